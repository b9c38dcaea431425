pub mod redis;

pub use redis::RedisTokenStore;
