//! Flowgate Node - Gateway configuration shared by the `flowgate` binary

pub mod config;
