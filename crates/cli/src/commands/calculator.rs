//! Carbon calculator commands.

use ewaste_tracker::AppState;
use ewaste_tracker::insights::{CalculatorInputs, CalculatorState};

use super::CommandError;

pub fn show(state: &AppState) -> Result<(), CommandError> {
    let user_id = &state.require_identity()?.id;
    report(&state.calculator().load(user_id));
    Ok(())
}

/// Calculate a footprint from `inputs` and save both.
pub fn set(state: &AppState, inputs: CalculatorInputs) -> Result<(), CommandError> {
    let user_id = &state.require_identity()?.id;
    report(&state.calculator().calculate(user_id, inputs));
    Ok(())
}

pub fn reset(state: &AppState) -> Result<(), CommandError> {
    let user_id = &state.require_identity()?.id;
    report(&state.calculator().reset(user_id));
    Ok(())
}

fn report(saved: &CalculatorState) {
    let t = &saved.inputs.transport;
    let h = &saved.inputs.home;
    let l = &saved.inputs.lifestyle;
    tracing::info!(
        "Transport: car {} mi, public {} mi, flights {} mi",
        t.car_miles,
        t.public_transport,
        t.flights
    );
    tracing::info!(
        "Home: electricity {} kWh, gas {}, heating {}",
        h.electricity,
        h.gas,
        h.heating
    );
    tracing::info!(
        "Lifestyle: diet {:?}, shopping {}, waste {}",
        l.diet,
        l.shopping,
        l.waste
    );

    match saved.results {
        Some(footprint) => tracing::info!(
            "Footprint: {:.1} kg CO2/yr (transport {:.1}, home {:.1}, lifestyle {:.1})",
            footprint.total,
            footprint.breakdown.transport,
            footprint.breakdown.home,
            footprint.breakdown.lifestyle
        ),
        None => tracing::info!("No footprint calculated yet"),
    }
}
