/*!
 * Scheduler Types
 * Policy names and round-robin quantum
 */

use crate::core::errors::SchedulerError;
use crate::core::limits::{RR30_QUANTUM, RR_QUANTUM};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Scheduling policy selected by `exec`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// First come, first served
    Fcfs,
    /// Non-preemptive shortest job first
    Sjf,
    /// Round-robin with a 2 instruction quantum
    RoundRobin,
    /// Round-robin with a 30 instruction quantum
    RoundRobin30,
    /// Shortest remaining score first with job aging
    Aging,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 5] = [
        Self::Fcfs,
        Self::Sjf,
        Self::RoundRobin,
        Self::RoundRobin30,
        Self::Aging,
    ];

    /// Shell name of the policy
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::RoundRobin => "RR",
            Self::RoundRobin30 => "RR30",
            Self::Aging => "AGING",
        }
    }

    /// Instruction budget per turn for the round-robin variants
    pub const fn quantum(&self) -> Option<Quantum> {
        match self {
            Self::RoundRobin => Some(Quantum::RR),
            Self::RoundRobin30 => Some(Quantum::RR30),
            _ => None,
        }
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    /// Names are matched exactly, as typed on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| SchedulerError::InvalidPolicy(s.into()))
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Round-robin quantum in instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quantum(NonZeroUsize);

impl Quantum {
    pub const RR: Quantum = Quantum(non_zero(RR_QUANTUM));
    pub const RR30: Quantum = Quantum(non_zero(RR30_QUANTUM));

    /// Create new quantum
    pub fn new(instructions: usize) -> Result<Self, SchedulerError> {
        NonZeroUsize::new(instructions)
            .map(Self)
            .ok_or(SchedulerError::InvalidQuantum(instructions))
    }

    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl<'de> Deserialize<'de> for Quantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let instructions = usize::deserialize(deserializer)?;
        Self::new(instructions).map_err(serde::de::Error::custom)
    }
}

const fn non_zero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("quantum must be at least one instruction"),
    }
}
