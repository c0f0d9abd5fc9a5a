pub mod add;
pub mod feed;
pub mod letters;
pub mod quiz;
pub mod random;
pub mod resolve;
pub mod saved;
pub mod search;
pub mod show;
pub mod stats;
