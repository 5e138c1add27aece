mod frequency;
mod imm;
mod rollday;

pub use crate::scheduling::frequency::{
    frequency::{Frequency, Scheduling},
    imm::Imm,
    rollday::{get_eom, is_eom, RollDay},
};
