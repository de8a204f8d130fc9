use generator;
use geometry::Point;
use itertools::Itertools;
use name::Name;
use process::Process;
use random::do_with_probability;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Full workload capacity of a computer, in percent.
pub const CAPACITY: i64 = 100;

/// Role of a computer in the balancing policy.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ComputerType {
    /// Pulls work from neighbours while under its workload threshold.
    Min,
    /// Pushes work to neighbours while over its saturation threshold.
    Max,
    /// Does both, pull first.
    MinMax,
}

impl ComputerType {
    pub fn from_name(name: &str) -> Option<ComputerType> {
        match name {
            "Min" => Some(ComputerType::Min),
            "Max" => Some(ComputerType::Max),
            "MinMax" => Some(ComputerType::MinMax),
            _ => None,
        }
    }

    fn pulls(&self) -> bool {
        *self != ComputerType::Max
    }

    fn pushes(&self) -> bool {
        *self != ComputerType::Min
    }
}

impl fmt::Display for ComputerType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            ComputerType::Min => "Min",
            ComputerType::Max => "Max",
            ComputerType::MinMax => "MinMax",
        };
        write!(f, "{}", name)
    }
}

/// User-editable properties of a computer.
///
/// Replaced wholesale by `Computer::set_properties`. No validation happens
/// here: the property-form/persistence boundary rejects bad input before it
/// ever reaches a computer.
#[derive(Clone, PartialEq, Debug)]
pub struct Properties {
    pub name: String,
    pub computer_type: ComputerType,
    /// Percentage boundary below which the computer is under-loaded.
    pub workload_threshold: u32,
    /// How many of the nearest neighbours to ask during one balancing pass.
    pub request_threshold: usize,
    /// Percent chance of spawning a fresh process on a tick.
    pub process_coefficient: u32,
}

impl Properties {
    pub fn new(computer_type: ComputerType) -> Self {
        Properties {
            computer_type,
            ..Properties::default()
        }
    }
}

impl Default for Properties {
    fn default() -> Properties {
        Properties {
            name: "computer".to_string(),
            computer_type: ComputerType::MinMax,
            workload_threshold: 30,
            request_threshold: 3,
            process_coefficient: 50,
        }
    }
}

/// A simulated computer: a set of owned processes, a position, and links to
/// its neighbours in the network.
pub struct Computer {
    /// Our handle in the network arena.
    name: Name,
    position: Point,
    properties: Properties,
    /// Neighbour handles in connection order. Symmetry is the topology
    /// owner's job; we never appear in our own list.
    neighbours: Vec<Name>,
    processes: Vec<Process>,
    /// Sum of the owned processes' workloads as of the last tick. Transfers
    /// adjust it immediately on both ends.
    workload: i64,
}

impl fmt::Display for Computer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Computer({})", self.name)
    }
}

impl Computer {
    pub fn new(name: Name, computer_type: ComputerType, position: Point) -> Self {
        Computer {
            name,
            position,
            properties: Properties::new(computer_type),
            neighbours: vec![],
            processes: vec![],
            workload: 0,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Replace the properties wholesale. Trusts the caller to have validated
    /// them already.
    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    pub fn workload(&self) -> i64 {
        self.workload
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Force a process onto this computer, bypassing the admission check.
    /// Its workload counts from the next tick, like a spawned process.
    pub fn inject_process(&mut self, process: Process) {
        self.processes.push(process);
    }

    /// Workload level above which a computer refuses pushed processes, and
    /// above which a `Max` computer starts shedding.
    fn saturation_threshold(&self) -> i64 {
        CAPACITY - self.properties.workload_threshold as i64
    }

    // Graph operations. One-sided: the network applies both directions.

    pub fn connect_to(&mut self, other: Name) {
        if other != self.name && !self.neighbours.contains(&other) {
            self.neighbours.push(other);
        }
    }

    pub fn disconnect_from(&mut self, other: Name) {
        self.neighbours.retain(|name| *name != other);
    }

    pub fn is_connected(&self, other: Name) -> bool {
        self.neighbours.contains(&other)
    }

    pub fn neighbours(&self) -> &[Name] {
        &self.neighbours
    }

    /// Run one tick: execute processes, refresh the workload, reap the dead,
    /// maybe spawn a fresh process, then balance against the neighbours.
    ///
    /// `peers` holds every other computer in the network; the caller takes us
    /// out of the arena for the duration of the call.
    pub fn update(&mut self, peers: &mut BTreeMap<Name, Computer>) {
        for process in &mut self.processes {
            process.execute();
        }

        // Processes that just died still count until the next tick.
        self.workload = self.processes.iter().map(Process::current_workload).sum();
        self.processes.retain(Process::is_active);

        if do_with_probability(self.properties.process_coefficient as f64 / 100.0) {
            let process = generator::random_process();
            trace!("{}: spawned {}", self, process);
            self.processes.push(process);
        }

        self.balance(peers);
    }

    fn balance(&mut self, peers: &mut BTreeMap<Name, Computer>) {
        if self.properties.computer_type.pulls() {
            self.balance_min(peers);
        }
        if self.properties.computer_type.pushes() {
            self.balance_max(peers);
        }
    }

    /// Pull at most one process from the nearest willing neighbour while
    /// under the workload threshold.
    fn balance_min(&mut self, peers: &mut BTreeMap<Name, Computer>) {
        let threshold = self.properties.workload_threshold as i64;
        if self.workload >= threshold {
            return;
        }
        let deficit = threshold - self.workload;

        for name in self.request_neighbours(peers) {
            let received = match peers.get_mut(&name) {
                Some(peer) => peer.request_receive_process(deficit),
                None => None,
            };
            if let Some(process) = received {
                debug!("{}: pulled {} from Computer({})", self, process, name);
                self.workload += process.current_workload();
                self.processes.push(process);
                return;
            }
        }
    }

    /// Push the lightest owned process to the nearest neighbour with spare
    /// capacity while over the saturation threshold.
    fn balance_max(&mut self, peers: &mut BTreeMap<Name, Computer>) {
        if self.workload <= self.saturation_threshold() {
            return;
        }
        let lightest = match self.lightest_process() {
            Some(index) => index,
            None => return,
        };

        let mut candidate = self.processes.remove(lightest);
        self.workload -= candidate.current_workload();

        for name in self.request_neighbours(peers) {
            let peer = match peers.get_mut(&name) {
                Some(peer) => peer,
                None => continue,
            };
            match peer.request_send_process(candidate) {
                Ok(()) => {
                    debug!("{}: pushed a process to Computer({})", self, name);
                    return;
                }
                Err(refused) => candidate = refused,
            }
        }

        // Nobody would take it; put it back where it was.
        self.workload += candidate.current_workload();
        self.processes.insert(lightest, candidate);
    }

    /// Index of the owned process with the smallest current workload, first
    /// encountered on ties.
    fn lightest_process(&self) -> Option<usize> {
        let mut lightest: Option<usize> = None;
        for (index, process) in self.processes.iter().enumerate() {
            let better = match lightest {
                Some(i) => process.current_workload() < self.processes[i].current_workload(),
                None => true,
            };
            if better {
                lightest = Some(index);
            }
        }
        lightest
    }

    /// Neighbours ranked by ascending distance, truncated to the request
    /// threshold. Recomputed on every call; equidistant neighbours keep their
    /// connection order (the sort is stable).
    pub fn request_neighbours(&self, peers: &BTreeMap<Name, Computer>) -> Vec<Name> {
        let mut ranked = self.neighbours
            .iter()
            .filter_map(|name| {
                peers
                    .get(name)
                    .map(|peer| (*name, self.position.distance_to(&peer.position)))
            })
            .sorted_by(|&(_, d1), &(_, d2)| d1.partial_cmp(&d2).unwrap_or(Ordering::Equal))
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        ranked.truncate(self.properties.request_threshold);
        ranked
    }

    /// Admission check for a process pushed by a peer: accept it iff it fits
    /// under the saturation threshold. Refusal hands the process back.
    pub fn request_send_process(&mut self, process: Process) -> Result<(), Process> {
        if self.workload + process.current_workload() <= self.saturation_threshold() {
            self.workload += process.current_workload();
            self.processes.push(process);
            Ok(())
        } else {
            Err(process)
        }
    }

    /// Give away the heaviest owned process that still fits the requester's
    /// deficit, or `None` if we have nothing spare.
    ///
    /// A pulling computer (`Min`/`MinMax`) only gives while it is itself in
    /// surplus; a pure `Max` computer gives whenever a process qualifies.
    pub fn request_receive_process(&mut self, expected_workload: i64) -> Option<Process> {
        if self.properties.computer_type.pulls()
            && self.workload <= self.properties.workload_threshold as i64
        {
            return None;
        }

        let mut best: Option<usize> = None;
        for (index, process) in self.processes.iter().enumerate() {
            if process.current_workload() > expected_workload {
                continue;
            }
            let better = match best {
                Some(i) => process.current_workload() > self.processes[i].current_workload(),
                None => true,
            };
            if better {
                best = Some(index);
            }
        }

        best.map(|index| {
            let process = self.processes.remove(index);
            self.workload -= process.current_workload();
            process
        })
    }
}
