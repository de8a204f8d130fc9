//! Randomized process factory.

use process::Process;
use random::{choose, random_range};

static NAMES: &'static [&'static str] =
    &["virus", "app", "script", "main", "server", "daemon", "node", "program"];

static EXTENSIONS: &'static [&'static str] =
    &[".js", ".py", ".exe", ".rb", ".sh", ".exs", ".jl"];

const LIFETIME_RANGE: (i64, i64) = (100, 250);
const WORKLOAD_RANGE: (i64, i64) = (2, 10);
const WORKLOAD_SPREAD_RANGE: (i64, i64) = (1, 3);

fn random_name() -> String {
    let name = choose(NAMES).unwrap();
    let postfix = random_range(1, 9);
    let extension = choose(EXTENSIONS).unwrap();
    format!("{}{}{}", name, postfix, extension)
}

/// Generate a process with a random name, lifetime and workload profile.
pub fn random_process() -> Process {
    let lifetime = random_range(LIFETIME_RANGE.0, LIFETIME_RANGE.1) as u32;
    let workload = random_range(WORKLOAD_RANGE.0, WORKLOAD_RANGE.1);
    let spread = random_range(WORKLOAD_SPREAD_RANGE.0, WORKLOAD_SPREAD_RANGE.1);
    Process::new(random_name(), lifetime, workload, spread)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_processes_stay_in_bounds() {
        for _ in 0..100 {
            let process = random_process();
            assert!(process.lifetime() >= 100 && process.lifetime() <= 250);
            assert!(process.current_workload() >= 2 && process.current_workload() <= 10);
            assert!(EXTENSIONS.iter().any(|ext| process.name().ends_with(ext)));
        }
    }
}
