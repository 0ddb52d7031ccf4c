pub mod bruteforce;
pub use bruteforce::{solve_bruteforce, solve_bruteforce_parallel, BruteForce};
pub mod dynamic;
pub use dynamic::solve_dp;
