//! Static work distribution across independent search workers.
//!
//! A run moves through a fixed sequence of phases:
//!
//! - the coordinator **partitions** column 0's rows into one contiguous
//!   [`Share`] per worker,
//! - **distributes** exactly one share to each rank,
//! - every worker **searches** its share on its own board,
//! - the coordinator **collects** one report per rank and
//! - **aggregates** them in rank order into the final list and count.
//!
//! Workers never talk to each other. The only synchronization points are the
//! distribute and collect collectives in [`transport`].

pub mod aggregate;
pub mod coordinator;
pub mod partition;
pub mod transport;

pub use aggregate::{aggregate, Aggregate, WorkerSummary};
pub use coordinator::{run_distributed, Coordinator, RunPhase, RunReport};
pub use partition::{partition, Share};
pub use transport::{create_endpoints, CoordinatorEndpoint, WorkerEndpoint, WorkerReport};
