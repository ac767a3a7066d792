#![allow(missing_docs)]

mod monitor;
mod poll_cycle;
mod series;
