// Floor statistics over the visible racks

use crate::model::Rack;

/// Summary shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloorSummary {
    pub rack_count: usize,
    pub server_count: usize,
    pub total_power_watts: u64,
    /// 0.0 when no rack is visible
    pub avg_power_per_rack_watts: f64,
}

pub fn summarize<'a, I>(racks: I) -> FloorSummary
where
    I: IntoIterator<Item = &'a Rack>,
{
    let mut summary = FloorSummary::default();
    for rack in racks {
        summary.rack_count += 1;
        summary.server_count += rack.servers.len();
        summary.total_power_watts += u64::from(rack.power_usage_watts);
    }
    if summary.rack_count > 0 {
        summary.avg_power_per_rack_watts =
            summary.total_power_watts as f64 / summary.rack_count as f64;
    }
    summary
}
