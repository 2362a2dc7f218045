//! Profit accounting for a simulated vehicle.

use std::fmt;

/// Running totals updated after every action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitTracker {
    pub actions: u32,
    pub pickups: u32,
    pub moves: u32,
    pub total_reward: f64,
    pub total_cost: f64,
    pub distance_km: f64,
}

impl ProfitTracker {
    /// Records one action with its earned reward and travelled distance.
    pub fn record(&mut self, pickup: bool, reward: f64, distance_km: f64, cost_per_km: f64) {
        self.actions += 1;
        if pickup {
            self.pickups += 1;
        } else {
            self.moves += 1;
        }
        self.total_reward += reward;
        self.distance_km += distance_km;
        self.total_cost += distance_km * cost_per_km;
    }

    pub fn total_profit(&self) -> f64 {
        self.total_reward - self.total_cost
    }

    /// Profit per action, 0 before the first action.
    pub fn average_profit(&self) -> f64 {
        if self.actions == 0 {
            0.0
        } else {
            self.total_profit() / self.actions as f64
        }
    }
}

/// Summary of a finished simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub behavior: String,
    pub tracker: ProfitTracker,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.tracker;
        writeln!(f, "=== Simulation Report ({}) ===", self.behavior)?;
        writeln!(f, "  Actions:          {}", t.actions)?;
        writeln!(f, "  Pickups:          {}", t.pickups)?;
        writeln!(f, "  Moves:            {}", t.moves)?;
        writeln!(f, "  Distance (km):    {:.1}", t.distance_km)?;
        writeln!(f, "  Total reward:     {:.2}", t.total_reward)?;
        writeln!(f, "  Total cost:       {:.2}", t.total_cost)?;
        writeln!(f, "  Total profit:     {:.2}", t.total_profit())?;
        writeln!(f, "  Average profit:   {:.2}", t.average_profit())
    }
}
