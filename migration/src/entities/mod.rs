pub mod comb;
pub mod honey;
