//! Annual carbon footprint calculator with per-user saved inputs.

use serde::{Deserialize, Deserializer, Serialize};

use ewaste_core::UserId;

use crate::models::session::keys;
use crate::storage::{self, SharedStorage};

/// kg CO2 per mile driven.
const CAR_PER_MILE: f64 = 0.404;
/// kg CO2 per mile of public transport.
const PUBLIC_TRANSPORT_PER_MILE: f64 = 0.089;
/// kg CO2 per mile flown.
const FLIGHT_PER_MILE: f64 = 0.255;
/// kg CO2 per kWh of electricity.
const ELECTRICITY_PER_KWH: f64 = 0.92;
/// kg CO2 per unit of gas.
const GAS_PER_UNIT: f64 = 2.04;
/// kg CO2 per unit of shopping spend.
const SHOPPING_PER_UNIT: f64 = 0.5;
/// kg CO2 per unit of waste.
const WASTE_PER_UNIT: f64 = 0.3;
const DAYS_PER_YEAR: f64 = 365.0;

/// Eating pattern, which sets a fixed daily emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Vegan,
    Vegetarian,
    #[default]
    Mixed,
    Meat,
}

impl Diet {
    /// kg CO2 per day.
    #[must_use]
    pub const fn daily_kg(self) -> f64 {
        match self {
            Self::Vegan => 1.5,
            Self::Vegetarian => 2.5,
            Self::Mixed => 3.3,
            Self::Meat => 4.2,
        }
    }
}

impl std::str::FromStr for Diet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vegan" => Ok(Self::Vegan),
            "vegetarian" => Ok(Self::Vegetarian),
            "mixed" => Ok(Self::Mixed),
            "meat" => Ok(Self::Meat),
            _ => Err(format!("invalid diet: {s}")),
        }
    }
}

/// Yearly travel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportInputs {
    #[serde(deserialize_with = "lenient_amount")]
    pub car_miles: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub public_transport: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub flights: f64,
}

/// Yearly home energy use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeInputs {
    #[serde(deserialize_with = "lenient_amount")]
    pub electricity: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub gas: f64,
    /// Recorded with the inputs but not part of the estimate.
    #[serde(deserialize_with = "lenient_amount")]
    pub heating: f64,
}

/// Diet and consumption.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifestyleInputs {
    pub diet: Diet,
    #[serde(deserialize_with = "lenient_amount")]
    pub shopping: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub waste: f64,
}

/// Everything the calculator asks for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorInputs {
    #[serde(rename = "transportData")]
    pub transport: TransportInputs,
    #[serde(rename = "homeData")]
    pub home: HomeInputs,
    #[serde(rename = "lifestyleData")]
    pub lifestyle: LifestyleInputs,
}

impl CalculatorInputs {
    /// Estimate annual emissions in kg CO2.
    ///
    /// Negative or non-finite inputs count as zero.
    #[must_use]
    pub fn footprint(&self) -> CarbonFootprint {
        let t = &self.transport;
        let transport = amount(t.car_miles) * CAR_PER_MILE
            + amount(t.public_transport) * PUBLIC_TRANSPORT_PER_MILE
            + amount(t.flights) * FLIGHT_PER_MILE;

        let home = amount(self.home.electricity) * ELECTRICITY_PER_KWH
            + amount(self.home.gas) * GAS_PER_UNIT;

        let l = &self.lifestyle;
        let lifestyle = l.diet.daily_kg() * DAYS_PER_YEAR
            + amount(l.shopping) * SHOPPING_PER_UNIT
            + amount(l.waste) * WASTE_PER_UNIT;

        CarbonFootprint {
            total: transport + home + lifestyle,
            breakdown: FootprintBreakdown {
                transport,
                home,
                lifestyle,
            },
        }
    }
}

fn amount(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Read an amount written either as a JSON number or as form text.
///
/// Blank or unparseable text reads as zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Number(value) => value,
        Amount::Text(text) => text.trim().parse().unwrap_or_default(),
    })
}

/// Annual emissions by area, kg CO2.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FootprintBreakdown {
    #[serde(deserialize_with = "lenient_amount")]
    pub transport: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub home: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub lifestyle: f64,
}

/// Result of a calculation, kg CO2 per year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarbonFootprint {
    #[serde(deserialize_with = "lenient_amount")]
    pub total: f64,
    pub breakdown: FootprintBreakdown,
}

/// A user's saved inputs and last result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorState {
    #[serde(flatten)]
    pub inputs: CalculatorInputs,
    pub results: Option<CarbonFootprint>,
}

/// Per-user calculator state, stored under `carbonCalculator_<userId>`.
pub struct CalculatorStore {
    storage: SharedStorage,
}

impl CalculatorStore {
    #[must_use]
    pub const fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Saved state for `user_id`; defaults when absent or unreadable.
    #[must_use]
    pub fn load(&self, user_id: &UserId) -> CalculatorState {
        storage::load_or_none(&*self.storage, &keys::calculator(user_id)).unwrap_or_default()
    }

    /// Save `inputs` for `user_id` together with their footprint.
    pub fn calculate(&self, user_id: &UserId, inputs: CalculatorInputs) -> CalculatorState {
        let state = CalculatorState {
            inputs,
            results: Some(inputs.footprint()),
        };
        storage::persist(&*self.storage, &keys::calculator(user_id), &state);

        tracing::info!(
            user_id = %user_id,
            total_kg = state.results.map(|r| r.total).unwrap_or_default(),
            "Saved carbon calculation"
        );
        state
    }

    /// Reset `user_id` to default inputs and no result.
    pub fn reset(&self, user_id: &UserId) -> CalculatorState {
        let state = CalculatorState::default();
        storage::persist(&*self.storage, &keys::calculator(user_id), &state);
        tracing::info!(user_id = %user_id, "Reset carbon calculator");
        state
    }
}
