//! Final report structures and assembly.

pub mod assembler;
pub mod entities;
