mod activation;
mod consumption;
pub(in crate::world) mod frayment;
mod grazer;
mod patch;
mod pools;
