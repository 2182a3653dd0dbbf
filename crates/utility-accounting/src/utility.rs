//! Utilities, measurement units and the council charges billed for each

use std::fmt;

use crate::constants;

/// A metered utility supplied to the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Utility {
    Electricity,
    Water,
    Effluent,
}

impl Utility {
    /// Report order
    pub const ALL: [Utility; 3] = [Utility::Electricity, Utility::Water, Utility::Effluent];

    /// Physical unit consumption is billed in
    pub fn physical_unit(self) -> Unit {
        match self {
            Utility::Electricity => Unit::Kwh,
            Utility::Water | Utility::Effluent => Unit::Kl,
        }
    }

    /// Council charges that make up the Rand amount billed to the building
    pub fn rand_charges(self) -> &'static [CouncilCharge] {
        match self {
            Utility::Electricity => &[
                CouncilCharge::MuniPeak,
                CouncilCharge::MuniStandard,
                CouncilCharge::MuniOffPeak,
                CouncilCharge::MuniMaxDemand,
                CouncilCharge::MuniNetworkAccess,
                CouncilCharge::MuniFixedCharge,
            ],
            Utility::Water => &[CouncilCharge::MuniWater],
            Utility::Effluent => &[CouncilCharge::MuniEffluent],
        }
    }

    /// Council charges that carry a consumption reading
    ///
    /// Demand, network access and fixed charges have no kWh component, so only
    /// the three time-of-use energy charges count towards electricity usage.
    pub fn consumption_charges(self) -> &'static [CouncilCharge] {
        match self {
            Utility::Electricity => &[
                CouncilCharge::MuniPeak,
                CouncilCharge::MuniStandard,
                CouncilCharge::MuniOffPeak,
            ],
            Utility::Water => &[CouncilCharge::MuniWater],
            Utility::Effluent => &[CouncilCharge::MuniEffluent],
        }
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utility::Electricity => write!(f, "Electricity"),
            Utility::Water => write!(f, "Water"),
            Utility::Effluent => write!(f, "Effluent"),
        }
    }
}

/// Unit key for a reported figure
///
/// Ordering puts Rand first so unit maps iterate the way the report lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Rand,
    Kwh,
    Kl,
}

impl Unit {
    pub fn is_currency(self) -> bool {
        self == Unit::Rand
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Rand => write!(f, "Rand"),
            Unit::Kwh => write!(f, "kWh"),
            Unit::Kl => write!(f, "kL"),
        }
    }
}

/// Which numeric column of a row to read
///
/// `Physical` is `consumption` on utility tables and `value` on the other info
/// table; `Rand` is `cost` and `rand` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Physical,
    Rand,
}

impl Measure {
    /// Unit key this measure reports under for a utility
    pub fn unit_for(self, utility: Utility) -> Unit {
        match self {
            Measure::Rand => Unit::Rand,
            Measure::Physical => utility.physical_unit(),
        }
    }
}

/// A named council line item from the other info table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouncilCharge {
    MuniPeak,
    MuniStandard,
    MuniOffPeak,
    MuniMaxDemand,
    MuniNetworkAccess,
    MuniFixedCharge,
    MuniWater,
    MuniEffluent,
}

impl CouncilCharge {
    pub const ALL: [CouncilCharge; 8] = [
        CouncilCharge::MuniPeak,
        CouncilCharge::MuniStandard,
        CouncilCharge::MuniOffPeak,
        CouncilCharge::MuniMaxDemand,
        CouncilCharge::MuniNetworkAccess,
        CouncilCharge::MuniFixedCharge,
        CouncilCharge::MuniWater,
        CouncilCharge::MuniEffluent,
    ];

    /// Exact variable name as it appears in the other info sheet
    pub fn name(self) -> &'static str {
        match self {
            CouncilCharge::MuniPeak => constants::MUNI_PEAK,
            CouncilCharge::MuniStandard => constants::MUNI_STANDARD,
            CouncilCharge::MuniOffPeak => constants::MUNI_OFF_PEAK,
            CouncilCharge::MuniMaxDemand => constants::MUNI_MAX_DEMAND,
            CouncilCharge::MuniNetworkAccess => constants::MUNI_NETWORK_ACCESS,
            CouncilCharge::MuniFixedCharge => constants::MUNI_FIXED_CHARGE,
            CouncilCharge::MuniWater => constants::MUNI_WATER,
            CouncilCharge::MuniEffluent => constants::MUNI_EFFLUENT,
        }
    }

    /// Case-sensitive exact match on a variable name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|charge| charge.name() == name)
    }
}

impl fmt::Display for CouncilCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
