#[derive(Clone, Debug)]
pub struct SimulationParams {
    /// Number of computers seeded into the starting network.
    pub num_computers: usize,
    /// Number of ticks to run.
    pub steps: u64,
    /// Extent of the plane computers are placed on.
    pub area_width: f64,
    pub area_height: f64,
    /// Probability of a computer being added on a given step.
    pub prob_add: f64,
    /// Probability of a computer being removed on a given step.
    pub prob_remove: f64,
    /// Probability that a new edge appears between two computers on a given step.
    pub prob_connect: f64,
    /// Probability that an existing edge is severed on a given step.
    pub prob_disconnect: f64,
    /// Step at which to start allowing random events (gives the network time
    /// to settle).
    pub start_random_events_step: u64,
}

impl Default for SimulationParams {
    fn default() -> SimulationParams {
        SimulationParams {
            num_computers: 8,
            steps: 500,
            area_width: 1280.0,
            area_height: 720.0,
            prob_add: 1.0 / 100.0,
            prob_remove: 1.0 / 400.0,
            prob_connect: 1.0 / 50.0,
            prob_disconnect: 1.0 / 200.0,
            start_random_events_step: 50,
        }
    }
}
