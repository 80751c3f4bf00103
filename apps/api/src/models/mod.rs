pub mod talent;
