//! Cache module for Redis-based state shared between instances

pub mod redis_client;

pub use redis_client::{RedisClient, WindowCount};
