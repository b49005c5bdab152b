// Rack filter engine
//
// Narrows a floor's racks to the ones the map should draw. The predicates are
// independent and combined with AND; the two explicit selections are combined
// according to SelectionMode. Filtering is stable and holds no state.

use crate::model::{PowerRange, Rack};
use std::collections::BTreeSet;

/// How explicit rack and server selections combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// A rack passes if its location is selected or it hosts a selected server
    #[default]
    Either,
    /// Each non-empty selection must match on its own
    Both,
}

impl SelectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Either => Self::Both,
            Self::Both => Self::Either,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Either => "any",
            Self::Both => "all",
        }
    }
}

/// The full set of active criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateSet {
    pub power_range: PowerRange,
    pub selected_rack_locations: BTreeSet<String>,
    pub selected_server_ids: BTreeSet<String>,
    /// Free text matched against server names; blank means no search
    pub search: Option<String>,
    pub mode: SelectionMode,
}

impl PredicateSet {
    /// Criteria that only bound the power draw
    pub fn with_power_range(power_range: PowerRange) -> Self {
        Self {
            power_range,
            selected_rack_locations: BTreeSet::new(),
            selected_server_ids: BTreeSet::new(),
            search: None,
            mode: SelectionMode::default(),
        }
    }

    /// Lowercased search term, `None` when absent or blank
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

pub fn passes_power(rack: &Rack, range: &PowerRange) -> bool {
    range.contains(rack.power_usage_watts)
}

pub fn passes_selection(rack: &Rack, predicates: &PredicateSet) -> bool {
    let racks = &predicates.selected_rack_locations;
    let servers = &predicates.selected_server_ids;
    if racks.is_empty() && servers.is_empty() {
        return true;
    }

    let rack_hit = racks.contains(&rack.location);
    let server_hit = rack.hosts_any(servers);
    match predicates.mode {
        SelectionMode::Either => rack_hit || server_hit,
        SelectionMode::Both => {
            (racks.is_empty() || rack_hit) && (servers.is_empty() || server_hit)
        }
    }
}

fn passes_search(rack: &Rack, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| rack.has_server_named(n))
}

/// Whether a single rack passes every predicate
pub fn matches(rack: &Rack, predicates: &PredicateSet) -> bool {
    passes_power(rack, &predicates.power_range)
        && passes_selection(rack, predicates)
        && passes_search(rack, predicates.search_needle().as_deref())
}

/// Racks that pass every predicate, in input order
pub fn filter_racks<'a, I>(racks: I, predicates: &PredicateSet) -> Vec<&'a Rack>
where
    I: IntoIterator<Item = &'a Rack>,
{
    let needle = predicates.search_needle();
    racks
        .into_iter()
        .filter(|rack| {
            passes_power(rack, &predicates.power_range)
                && passes_selection(rack, predicates)
                && passes_search(rack, needle.as_deref())
        })
        .collect()
}
