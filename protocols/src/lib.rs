//! Wire-format construction for the reachability probe primitive.

pub mod icmp;
