mod common;
mod derivation;
