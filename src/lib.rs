//! A discrete-event simulator for Raymond's tree-based distributed mutual-exclusion
//! algorithm (ACM TOCS 7(1), 1989): one mediator thread totally orders REQUEST_CS,
//! PASS_REQUEST, PASS_TOKEN, and EXIT_CS events against per-node state machines while N
//! node-driver threads generate synthetic workload.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod id;
pub mod mediator;
pub mod message;
pub mod node;
pub mod rendezvous;
pub mod summary;
pub mod time_gen;
pub mod topology;
pub mod trace;
