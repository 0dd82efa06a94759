//! Signal-processing activities served over request/reply JSON-RPC.
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `version` | none | `"0.1"` |
//! | `activities` | none | `[{"name", "info"}]` |
//! | `proc` | `{"name", "args"}` or `[name, args]` | activity output |

use reqrep_server::{
    MethodError, MethodResult, Params, RpcServerBuilder, ServerConfig, typed,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

pub const API_VERSION: &str = "0.1";

/// A named transformation of a row of numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Smooth,
    Decompose,
}

impl Activity {
    pub const ALL: [Activity; 2] = [Activity::Smooth, Activity::Decompose];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|activity| activity.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activity::Smooth => "Smooth",
            Activity::Decompose => "Decompose",
        }
    }

    pub fn info(&self) -> &'static str {
        match self {
            Activity::Smooth => "Smooth row of numeric values.",
            Activity::Decompose => "Decompose signal to two components.",
        }
    }

    pub fn run(&self, values: &[f64]) -> Value {
        match self {
            Activity::Smooth => json!(smooth(values)),
            Activity::Decompose => json!(decompose(values)),
        }
    }
}

/// Means of neighbouring values; one shorter than the input
pub fn smooth(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect()
}

/// Split each value into a half and the remainder
pub fn decompose(values: &[f64]) -> [Vec<f64>; 2] {
    let halves: Vec<f64> = values.iter().map(|value| value / 2.0).collect();
    let remainders = values
        .iter()
        .zip(&halves)
        .map(|(value, half)| value - half)
        .collect();
    [halves, remainders]
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityInfo {
    pub name: &'static str,
    pub info: &'static str,
}

pub fn activities_info() -> Vec<ActivityInfo> {
    Activity::ALL
        .iter()
        .map(|activity| ActivityInfo {
            name: activity.name(),
            info: activity.info(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ProcParams {
    pub name: String,
    pub args: Vec<f64>,
}

pub fn run_activity(params: ProcParams) -> MethodResult {
    let activity = Activity::from_name(&params.name)
        .ok_or_else(|| MethodError::invalid_params("Wrong activity name"))?;
    debug!(activity = activity.name(), values = params.args.len(), "Running activity");
    Ok(activity.run(&params.args))
}

/// Server builder with the activity methods registered
pub fn builder(config: ServerConfig) -> RpcServerBuilder {
    RpcServerBuilder::new()
        .name("activity-server")
        .config(config)
        .method("version", |_: Params| -> MethodResult { Ok(json!(API_VERSION)) })
        .method("activities", |_: Params| -> MethodResult {
            Ok(serde_json::to_value(activities_info())?)
        })
        .method("proc", typed(run_activity))
}
