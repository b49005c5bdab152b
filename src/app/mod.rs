// Application state management
//
// This module contains the main AppState struct and re-exports
// configuration types from the config submodule.
//
// AppState is the control surface of a session: every user action goes
// through one of its methods, and every panel reads the derived views
// (visible racks, summary, rack cells, server slots) recomputed on demand.

pub mod config;
pub mod event;

// Re-export config types for convenience
pub use config::{GridConfig, ViewSettings};

use crate::filter::{self, PredicateSet};
use crate::interaction::{DrillDown, HoverState, Interaction};
use crate::layout::{self, location_code, power_color, Bounds, Rgba};
use crate::model::{FloorPlan, IndexedFloor, PowerRange, Rack, Server, ServerStatus, Watts};
use crate::stats::{self, FloorSummary};
use config::{MAX_POWER_W, MIN_POWER_W, POWER_SCALE, POWER_STEP_W};
use ratatui::layout::Rect;
use std::collections::BTreeSet;

/// Padding around the racks in the map viewport, in plan units
const VIEWPORT_MARGIN: f64 = 10.0;

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box
    Search,
}

/// One rack as the map draws it
#[derive(Debug, Clone, PartialEq)]
pub struct RackCell {
    pub bounds: Bounds,
    pub color: Rgba,
    pub label: String,
    pub selected: bool,
    pub hovered: bool,
}

/// One server as the rack view draws it
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSlot {
    pub server_id: String,
    pub bounds: Bounds,
    pub status: ServerStatus,
    pub selected: bool,
    /// Faceplate badge of the server's model
    pub badge: String,
    /// Model LED color as RGB
    pub led: (u8, u8, u8),
}

/// Entry of a multiselect option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Which selection a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Racks,
    Servers,
}

/// Checklist overlay for editing a whole selection at once
///
/// Changes stay local until applied, so cancelling leaves the selection
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Picker {
    pub kind: PickerKind,
    pub options: Vec<SelectOption>,
    pub checked: BTreeSet<String>,
    pub cursor: usize,
}

impl Picker {
    pub fn move_cursor(&mut self, delta: i32) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() as i64 - 1;
        self.cursor = (self.cursor as i64 + delta as i64).clamp(0, last) as usize;
    }

    /// Check or uncheck the option under the cursor
    pub fn toggle(&mut self) {
        if let Some(option) = self.options.get(self.cursor) {
            if !self.checked.remove(&option.value) {
                self.checked.insert(option.value.clone());
            }
        }
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.checked.contains(value)
    }
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    plan: FloorPlan,

    /// Index of the active floor in the plan
    active_floor: usize,

    /// Where the floors came from, shown in the header
    pub source_label: String,

    /// Inclusive power filter, always inside the power scale
    power_range: PowerRange,

    /// Raw search text as typed
    pub search: String,

    pub input_mode: InputMode,

    pub interaction: Interaction,

    /// Keyboard cursor on the rack grid as (row, col)
    pub cursor: (u16, u16),

    /// Highlighted row in the rack view
    pub server_cursor: usize,

    pub view: ViewSettings,

    /// Inner area of the floor map from the last frame, for mouse mapping
    pub map_area: Rect,

    /// Inner area of the rack view's slot diagram from the last frame
    pub slots_area: Rect,

    /// Last warning shown in the status bar
    pub notice: Option<String>,

    /// Open selection picker, if any
    pub picker: Option<Picker>,
}

impl AppState {
    /// Create a session over a validated plan, starting on its first floor
    pub fn new(plan: FloorPlan, source_label: impl Into<String>, view: ViewSettings) -> Self {
        Self {
            running: true,
            plan,
            active_floor: 0,
            source_label: source_label.into(),
            power_range: POWER_SCALE,
            search: String::new(),
            input_mode: InputMode::Normal,
            interaction: Interaction::new(),
            cursor: (0, 0),
            server_cursor: 0,
            view,
            map_area: Rect::default(),
            slots_area: Rect::default(),
            notice: None,
            picker: None,
        }
    }

    // ------------------------------------------------------------------
    // Floors
    // ------------------------------------------------------------------

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn active_floor(&self) -> &IndexedFloor {
        // FloorPlan::new rejects plans without floors and active_floor only
        // ever holds positions returned by the plan
        &self.plan.floors()[self.active_floor]
    }

    pub fn active_floor_index(&self) -> usize {
        self.active_floor
    }

    /// Switch to the floor with `floor_id`, resetting hover, drill-down and
    /// selections. Returns `false` for an unknown id.
    pub fn switch_floor(&mut self, floor_id: u32) -> bool {
        let Some(idx) = self.plan.position_of(floor_id) else {
            self.warn(format!("No floor with id {}", floor_id));
            return false;
        };
        if idx != self.active_floor {
            self.active_floor = idx;
            self.interaction.reset_for_floor_switch();
            self.picker = None;
            self.cursor = (0, 0);
            self.server_cursor = 0;
            tracing::info!(floor = floor_id, "Switched floor");
        }
        true
    }

    /// Switch to the floor at `position` in plan order (0-based)
    pub fn switch_floor_at(&mut self, position: usize) -> bool {
        match self.plan.floor_at(position).map(IndexedFloor::id) {
            Some(id) => self.switch_floor(id),
            None => {
                self.warn(format!("No floor number {}", position + 1));
                false
            }
        }
    }

    /// Cycle to the next floor, wrapping around
    pub fn next_floor(&mut self) {
        let next = (self.active_floor + 1) % self.plan.len().max(1);
        self.switch_floor_at(next);
    }

    // ------------------------------------------------------------------
    // Power range
    // ------------------------------------------------------------------

    pub fn power_range(&self) -> PowerRange {
        self.power_range
    }

    /// Set the filter bounds; both are clamped into the scale and swapped if
    /// given in the wrong order
    pub fn set_power_range(&mut self, lo: Watts, hi: Watts) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.power_range = PowerRange::new(POWER_SCALE.clamp(lo), POWER_SCALE.clamp(hi));
        tracing::debug!(
            min = self.power_range.min_watts,
            max = self.power_range.max_watts,
            "Power range changed"
        );
        self.drop_hidden_hover();
    }

    /// Move the lower bound by `steps` increments, never past the upper bound
    pub fn step_min(&mut self, steps: i32) {
        let current = self.power_range;
        let lo = step(current.min_watts, steps).clamp(MIN_POWER_W, current.max_watts);
        self.set_power_range(lo, current.max_watts);
    }

    /// Move the upper bound by `steps` increments, never below the lower bound
    pub fn step_max(&mut self, steps: i32) {
        let current = self.power_range;
        let hi = step(current.max_watts, steps).clamp(current.min_watts, MAX_POWER_W);
        self.set_power_range(current.min_watts, hi);
    }

    pub fn reset_power_range(&mut self) {
        self.set_power_range(POWER_SCALE.min_watts, POWER_SCALE.max_watts);
    }

    // ------------------------------------------------------------------
    // Multi-select
    // ------------------------------------------------------------------

    /// Replace the rack selection; locations missing from the active floor
    /// are dropped. Returns how many were kept.
    pub fn set_selected_racks<I: IntoIterator<Item = String>>(&mut self, locations: I) -> usize {
        let (known, unknown): (Vec<String>, Vec<String>) = locations
            .into_iter()
            .partition(|loc| self.active_floor().rack_at_location(loc).is_some());
        if !unknown.is_empty() {
            self.warn(format!("Ignored unknown rack locations: {}", unknown.join(", ")));
        }
        let kept = known.len();
        self.interaction.selection.set_racks(known);
        self.drop_hidden_hover();
        kept
    }

    /// Replace the server selection; ids missing from the active floor are
    /// dropped. Returns how many were kept.
    pub fn set_selected_servers<I: IntoIterator<Item = String>>(&mut self, ids: I) -> usize {
        let (known, unknown): (Vec<String>, Vec<String>) = ids
            .into_iter()
            .partition(|id| self.active_floor().server(id).is_some());
        if !unknown.is_empty() {
            self.warn(format!("Ignored unknown server ids: {}", unknown.join(", ")));
        }
        let kept = known.len();
        self.interaction.selection.set_servers(known);
        self.drop_hidden_hover();
        kept
    }

    /// Toggle a rack location; `false` when it is not on the active floor
    pub fn toggle_rack_selection(&mut self, location: &str) -> bool {
        if self.active_floor().rack_at_location(location).is_none() {
            self.warn(format!("No rack at {}", location));
            return false;
        }
        let now = self.interaction.selection.toggle_rack(location);
        tracing::debug!(rack = location, selected = now, "Rack selection toggled");
        self.drop_hidden_hover();
        true
    }

    /// Toggle a server id; `false` when it is not on the active floor
    pub fn toggle_server_selection(&mut self, server_id: &str) -> bool {
        if self.active_floor().server(server_id).is_none() {
            self.warn(format!("No server {}", server_id));
            return false;
        }
        let now = self.interaction.selection.toggle_server(server_id);
        tracing::debug!(server = server_id, selected = now, "Server selection toggled");
        self.drop_hidden_hover();
        true
    }

    pub fn clear_rack_selection(&mut self) {
        self.interaction.selection.clear_racks();
    }

    pub fn clear_server_selection(&mut self) {
        self.interaction.selection.clear_servers();
    }

    pub fn toggle_selection_mode(&mut self) {
        self.view.selection_mode = self.view.selection_mode.toggled();
        self.drop_hidden_hover();
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.drop_hidden_hover();
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.drop_hidden_hover();
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.drop_hidden_hover();
    }

    // ------------------------------------------------------------------
    // Drill-down
    // ------------------------------------------------------------------

    /// Open the rack view for `rack_id`; `false` when it is not on the
    /// active floor
    pub fn rack_click(&mut self, rack_id: &str) -> bool {
        let floor = &self.plan.floors()[self.active_floor];
        match floor.rack(rack_id) {
            Some(rack) => {
                self.interaction.open_rack(rack);
                self.server_cursor = 0;
                true
            }
            None => {
                self.warn(format!("No rack {}", rack_id));
                false
            }
        }
    }

    /// Choose a server in the open rack; `false` when no rack is open or the
    /// server is not mounted in it
    pub fn server_click(&mut self, server_id: &str) -> bool {
        let floor = &self.plan.floors()[self.active_floor];
        let clicked = match self.interaction.drill_down.rack_id().and_then(|id| floor.rack(id)) {
            Some(rack) => self.interaction.click_server(rack, server_id),
            None => false,
        };
        if !clicked {
            self.warn(format!("Server {} is not in the open rack", server_id));
        }
        clicked
    }

    pub fn close_drill_down(&mut self) {
        self.interaction.close_drill_down();
        self.server_cursor = 0;
    }

    /// Rack shown in the rack view, if any
    pub fn open_rack(&self) -> Option<&Rack> {
        self.interaction
            .drill_down
            .rack_id()
            .and_then(|id| self.active_floor().rack(id))
    }

    pub fn selected_server(&self) -> Option<&Server> {
        self.lookup_server(self.interaction.drill_down.selected_server())
    }

    pub fn hovered_server(&self) -> Option<&Server> {
        self.lookup_server(self.interaction.drill_down.hovered_server())
    }

    fn lookup_server(&self, id: Option<&str>) -> Option<&Server> {
        id.and_then(|id| self.active_floor().server(id))
            .map(|(_, server)| server)
    }

    /// Move the rack-view cursor by `delta` rows and hover that server
    pub fn move_server_cursor(&mut self, delta: i32) {
        let Some(count) = self.open_rack().map(Rack::server_count) else {
            return;
        };
        if count == 0 {
            return;
        }
        let next = (self.server_cursor as i64 + delta as i64).clamp(0, count as i64 - 1);
        self.server_cursor = next as usize;
        self.sync_server_hover();
    }

    /// Server under the rack-view cursor
    pub fn server_at_cursor(&self) -> Option<&Server> {
        self.open_rack()
            .and_then(|rack| rack.servers.get(self.server_cursor))
    }

    fn sync_server_hover(&mut self) {
        let id = self.server_at_cursor().map(|s| s.id.clone());
        self.interaction.hover_server(id.as_deref());
    }

    // ------------------------------------------------------------------
    // Pointer and cursor
    // ------------------------------------------------------------------

    /// Grid size of the active floor as (rows, cols), from its racks
    pub fn grid_dims(&self) -> (u16, u16) {
        self.active_floor()
            .racks()
            .iter()
            .fold((0, 0), |(rows, cols), rack| {
                (rows.max(rack.grid_row + 1), cols.max(rack.grid_col + 1))
            })
    }

    /// Move the keyboard cursor, clamped to the grid, and hover the rack under it
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let (rows, cols) = self.grid_dims();
        if rows == 0 || cols == 0 {
            return;
        }
        let row = (self.cursor.0 as i32 + d_row).clamp(0, rows as i32 - 1) as u16;
        let col = (self.cursor.1 as i32 + d_col).clamp(0, cols as i32 - 1) as u16;
        self.cursor = (row, col);
        self.refresh_hover();
    }

    /// Visible rack under the keyboard cursor
    pub fn rack_at_cursor(&self) -> Option<&Rack> {
        let location = location_code(self.cursor.0, self.cursor.1);
        self.active_floor()
            .rack_at_location(&location)
            .filter(|rack| filter::matches(rack, &self.predicates()))
    }

    /// Hover whatever the cursor points at, or nothing
    fn refresh_hover(&mut self) {
        let floor = &self.plan.floors()[self.active_floor];
        let predicates = self.predicates();
        let location = location_code(self.cursor.0, self.cursor.1);
        match floor
            .rack_at_location(&location)
            .filter(|rack| filter::matches(rack, &predicates))
        {
            Some(rack) => self.interaction.pointer_enter(rack),
            None => self.interaction.pointer_leave(),
        }
    }

    /// Hide the tooltip of a rack the filter no longer shows
    fn drop_hidden_hover(&mut self) {
        let hidden = self.interaction.hover.rack_id().is_some_and(|id| {
            self.active_floor()
                .rack(id)
                .map_or(true, |rack| !filter::matches(rack, &self.predicates()))
        });
        if hidden {
            self.interaction.pointer_leave();
        }
    }

    /// Pointer moved to plan coordinates (x, y)
    pub fn pointer_at(&mut self, x: f64, y: f64) {
        let floor = &self.plan.floors()[self.active_floor];
        let predicates = self.predicates();
        let visible = filter::filter_racks(floor.racks(), &predicates);
        match layout::rack_at(visible, x, y) {
            Some(rack) => {
                self.cursor = (rack.grid_row, rack.grid_col);
                self.interaction.pointer_enter(rack);
            }
            None => self.interaction.pointer_leave(),
        }
    }

    /// Pointer left the map
    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Click at plan coordinates; opens the visible rack there, if any
    pub fn click_at(&mut self, x: f64, y: f64) -> bool {
        let floor = &self.plan.floors()[self.active_floor];
        let visible = filter::filter_racks(floor.racks(), &self.predicates());
        let Some(rack_id) = layout::rack_at(visible, x, y).map(|r| r.id.clone()) else {
            return false;
        };
        self.rack_click(&rack_id)
    }

    /// Map area bounds in plan coordinates
    pub fn map_viewport(&self) -> Bounds {
        let mut racks = self.active_floor().racks().iter().map(layout::rack_bounds);
        let Some(first) = racks.next() else {
            return Bounds {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 100.0,
            };
        };
        let (left, top, right, bottom) = racks.fold(
            (first.x, first.y, first.right(), first.bottom()),
            |(l, t, r, b), bounds| {
                (
                    l.min(bounds.x),
                    t.min(bounds.y),
                    r.max(bounds.right()),
                    b.max(bounds.bottom()),
                )
            },
        );
        Bounds {
            x: left - VIEWPORT_MARGIN,
            y: top - VIEWPORT_MARGIN,
            width: right - left + 2.0 * VIEWPORT_MARGIN,
            height: bottom - top + 2.0 * VIEWPORT_MARGIN,
        }
    }

    /// Terminal cell to plan coordinates, using the map area of the last
    /// frame. `None` outside the map.
    pub fn cell_to_plan(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        cell_to_point(self.map_area, &self.map_viewport(), column, row)
    }

    // ------------------------------------------------------------------
    // Slot diagram pointer
    // ------------------------------------------------------------------

    /// Slot diagram bounds in slot units
    pub fn slot_viewport(&self) -> Bounds {
        let extent = self
            .server_slots()
            .iter()
            .map(|s| s.bounds.bottom())
            .fold(100.0_f64, f64::max);
        Bounds {
            x: 40.0,
            y: 40.0,
            width: 320.0,
            height: extent - 30.0,
        }
    }

    /// Terminal cell to slot coordinates; `None` outside the slot diagram or
    /// when no rack is open
    pub fn cell_to_slot(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        if !self.is_drill_down_open() {
            return None;
        }
        cell_to_point(self.slots_area, &self.slot_viewport(), column, row)
    }

    /// Index in the open rack of the server drawn at slot point (x, y)
    fn slot_index_at(&self, x: f64, y: f64) -> Option<usize> {
        self.server_slots()
            .iter()
            .position(|slot| slot.bounds.contains(x, y))
    }

    /// Pointer moved to slot coordinates (x, y); hovers the server there
    pub fn slot_pointer_at(&mut self, x: f64, y: f64) {
        match self.slot_index_at(x, y) {
            Some(index) => {
                self.server_cursor = index;
                self.sync_server_hover();
            }
            None => self.interaction.hover_server(None),
        }
    }

    /// Click at slot coordinates; chooses the server there, if any
    pub fn slot_click_at(&mut self, x: f64, y: f64) -> bool {
        let Some(index) = self.slot_index_at(x, y) else {
            return false;
        };
        self.server_cursor = index;
        match self.server_at_cursor().map(|s| s.id.clone()) {
            Some(id) => self.server_click(&id),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Current filter predicates
    pub fn predicates(&self) -> PredicateSet {
        let search = self.search.trim();
        PredicateSet {
            selected_rack_locations: self.interaction.selection.rack_locations().clone(),
            selected_server_ids: self.interaction.selection.server_ids().clone(),
            search: (!search.is_empty()).then(|| search.to_string()),
            mode: self.view.selection_mode,
            ..PredicateSet::with_power_range(self.power_range)
        }
    }

    pub fn visible_racks(&self) -> Vec<&Rack> {
        filter::filter_racks(self.active_floor().racks(), &self.predicates())
    }

    pub fn summary(&self) -> FloorSummary {
        stats::summarize(self.visible_racks())
    }

    /// Drawable cells for the visible racks, in floor order
    pub fn rack_cells(&self) -> Vec<RackCell> {
        let hovered = self.interaction.hover.rack_id();
        self.visible_racks()
            .into_iter()
            .map(|rack| RackCell {
                bounds: layout::rack_bounds(rack),
                color: power_color(rack.power_usage_watts, &POWER_SCALE),
                label: rack.location.clone(),
                selected: self.interaction.selection.is_rack_selected(&rack.location),
                hovered: hovered == Some(rack.id.as_str()),
            })
            .collect()
    }

    /// Drawable slots for the servers of the open rack, by position
    pub fn server_slots(&self) -> Vec<ServerSlot> {
        let Some(rack) = self.open_rack() else {
            return Vec::new();
        };
        let catalog = self.plan.catalog();
        let selected = self.interaction.drill_down.selected_server();
        rack.servers
            .iter()
            .enumerate()
            .map(|(index, server)| {
                let model = catalog.get(&server.model);
                let units = model.map_or(1, |m| m.rack_units);
                let (badge, led) = match model {
                    Some(m) => (m.symbol.label.clone(), m.symbol.led),
                    None => (server.model.clone(), (128, 128, 128)),
                };
                ServerSlot {
                    server_id: server.id.clone(),
                    bounds: layout::server_slot(index, units),
                    status: server.status,
                    selected: selected == Some(server.id.as_str())
                        || self.interaction.selection.is_server_selected(&server.id),
                    badge,
                    led,
                }
            })
            .collect()
    }

    /// Rack options for the multiselect, sorted by location
    pub fn rack_options(&self) -> Vec<SelectOption> {
        let mut racks: Vec<&Rack> = self.active_floor().racks().iter().collect();
        racks.sort_by(|a, b| a.location.cmp(&b.location));
        racks
            .into_iter()
            .map(|rack| SelectOption {
                value: rack.location.clone(),
                label: format!("{} ({}W)", rack.location, rack.power_usage_watts),
            })
            .collect()
    }

    /// Server options for the multiselect, sorted by name
    pub fn server_options(&self) -> Vec<SelectOption> {
        let mut servers: Vec<(&Rack, &Server)> = self
            .active_floor()
            .racks()
            .iter()
            .flat_map(|rack| rack.servers.iter().map(move |server| (rack, server)))
            .collect();
        servers.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        servers
            .into_iter()
            .map(|(rack, server)| SelectOption {
                value: server.id.clone(),
                label: format!("{} ({})", server.name, rack.location),
            })
            .collect()
    }

    /// Hover tooltip lines and their plan-coordinate anchor
    pub fn rack_tooltip(&self) -> Option<(Vec<String>, (f64, f64))> {
        match &self.interaction.hover {
            HoverState::Idle => None,
            HoverState::ShowingTooltip {
                tooltip, position, ..
            } => Some((tooltip.lines(), *position)),
        }
    }

    // ------------------------------------------------------------------
    // Picker
    // ------------------------------------------------------------------

    /// Open the picker for racks or servers, pre-checked with the current
    /// selection
    pub fn open_picker(&mut self, kind: PickerKind) {
        let (options, checked) = match kind {
            PickerKind::Racks => (
                self.rack_options(),
                self.interaction.selection.rack_locations().clone(),
            ),
            PickerKind::Servers => (
                self.server_options(),
                self.interaction.selection.server_ids().clone(),
            ),
        };
        self.picker = Some(Picker {
            kind,
            options,
            checked,
            cursor: 0,
        });
    }

    /// Replace the selection with the picker's checked options and close it
    pub fn apply_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let kept = match picker.kind {
            PickerKind::Racks => self.set_selected_racks(picker.checked),
            PickerKind::Servers => self.set_selected_servers(picker.checked),
        };
        tracing::debug!(kind = ?picker.kind, kept, "Picker applied");
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
    }

    pub fn is_drill_down_open(&self) -> bool {
        matches!(self.interaction.drill_down, DrillDown::Open { .. })
    }

    fn warn(&mut self, message: String) {
        tracing::warn!(floor = self.active_floor().id(), "{}", message);
        self.notice = Some(message);
    }
}

/// Center of terminal cell (column, row) mapped from `area` onto `viewport`
fn cell_to_point(area: Rect, viewport: &Bounds, column: u16, row: u16) -> Option<(f64, f64)> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let fx = (column - area.x) as f64 + 0.5;
    let fy = (row - area.y) as f64 + 0.5;
    Some((
        viewport.x + fx / area.width as f64 * viewport.width,
        viewport.y + fy / area.height as f64 * viewport.height,
    ))
}

fn step(watts: Watts, steps: i32) -> Watts {
    let delta = steps as i64 * POWER_STEP_W as i64;
    (watts as i64 + delta).clamp(0, Watts::MAX as i64) as Watts
}
