// Integration suites link against the library; the binary only wires the
// stdio presentation adapter.
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod prediction;
pub mod protocol;
pub mod session;
pub mod view;
