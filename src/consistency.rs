use itertools::Itertools;
use network::Network;

/// Check the structural invariants of the neighbour graph.
///
/// Every edge must be symmetric, no computer may neighbour itself, and every
/// neighbour handle must resolve to a live computer.
pub fn check_graph(network: &Network) -> Result<(), ()> {
    let mut failed = false;

    for (a, b) in network.names().into_iter().tuple_combinations() {
        if network.is_connected(a, b) != network.is_connected(b, a) {
            failed = true;
            println!("asymmetric edge between {} and {}", a, b);
        }
    }

    for (name, computer) in network.computers() {
        if computer.is_connected(*name) {
            failed = true;
            println!("Computer({}) neighbours itself", name);
        }
        for neighbour in computer.neighbours() {
            if network.get(*neighbour).is_none() {
                failed = true;
                println!("Computer({}) has a dangling neighbour {}", name, neighbour);
            }
        }
    }

    if failed {
        println!("network graph not consistent: see above");
        Err(())
    } else {
        Ok(())
    }
}
