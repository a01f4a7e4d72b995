//! Battery runtime estimates from measured power draw.

/// Used when `BATTERY_WH` is not set.
pub const DEFAULT_BATTERIES: &str = "2x AAA Lithium:3.6,5000mAh Samsung:18.5,19,60,80";

#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub name: String,
    pub watt_hours: f64,
}

/// Parse `name:Wh` items or bare Wh numbers, comma separated.
///
/// A bare number gets a generated name such as `19.0Wh battery`. If any item
/// fails to parse the whole list is rejected and an empty list is returned.
pub fn parse_batteries(spec: &str) -> Vec<Battery> {
    spec.split(',')
        .map(|item| parse_item(item.trim()))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

fn parse_item(item: &str) -> Option<Battery> {
    match item.split_once(':') {
        Some((name, wh)) => Some(Battery {
            name: name.trim().to_string(),
            watt_hours: wh.trim().parse().ok()?,
        }),
        None => {
            let watt_hours: f64 = item.parse().ok()?;
            Some(Battery {
                name: format!("{watt_hours:.1}Wh battery"),
                watt_hours,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeEstimate {
    pub hours: f64,
    /// Tokens generated on a full charge; 0 when energy per token is unknown
    pub tokens: u64,
}

/// Runtime on `battery` at `net_watts`, and tokens at `joules_per_token`.
pub fn estimate_runtime(battery: &Battery, net_watts: f64, joules_per_token: f64) -> RuntimeEstimate {
    let tokens = if joules_per_token > 0.0 {
        (battery.watt_hours * 3600.0 / joules_per_token) as u64
    } else {
        0
    };
    RuntimeEstimate {
        hours: battery.watt_hours / net_watts,
        tokens,
    }
}
