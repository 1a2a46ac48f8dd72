//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders the board, turns mouse drags and key
//! presses into gestures and commands for the core, and carries out the
//! effects the dispatcher asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Frame Cycle
//!
//! ```text
//! draw ─► sync mounts ─► take latest commit notice ─► dispatch effects
//!   ▲                                                        │
//!   └──────────── poll input ◄───────────────────────────────┘
//! ```
//!
//! Effects are dispatched only after the frame that shows the committed
//! state has been drawn and its entities registered, so a card that just
//! changed container is looked up under its new handles. When several
//! commits land between two frames only the latest one has effects.

mod component;
mod components;
mod drag;
mod event;
mod mount;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::MoveRequest;
use crate::core::config::ResolvedConfig;
use crate::core::effects::{Effect, EffectDispatcher};
use crate::core::error::BoardError;
use crate::core::gesture::{Gesture, command_request, container_menu, item_menu, resolve_drop};
use crate::core::registry::{Handle, IdentityRegistry};
use crate::core::state::{BoardState, Container};
use crate::core::store::{BoardStore, CommitNotice};
use crate::tui::component::EventHandler;
use crate::tui::components::{ActionMenuState, MenuEvent};
use crate::tui::drag::DragState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::mount::{Mounts, Target};
use crate::tui::ui::{BoardLayout, Hit};

const IDLE_TICK: Duration = Duration::from_millis(500);
const FLASH_TICK: Duration = Duration::from_millis(50);

/// Keyboard focus, by id so it survives reorders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Column(String),
    Card(String),
}

#[derive(Debug, Clone, Copy)]
struct Flash {
    handle: Handle,
    until: Instant,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub store: BoardStore,
    commits: Receiver<CommitNotice>,
    dispatcher: EffectDispatcher,
    registry: IdentityRegistry,
    mounts: Mounts,
    // Geometry of the last frame
    pub layout: BoardLayout,
    pub focus: Option<Focus>,
    pub drag: Option<DragState>,
    pub menu: Option<ActionMenuState>,
    flash: Option<Flash>,
    // Live region
    pub status_message: String,
    flash_duration: Duration,
    announcements: bool,
}

impl TuiState {
    pub fn new(board: BoardState, config: &ResolvedConfig) -> Self {
        let mut store = BoardStore::new(board);
        let commits = store.subscribe();
        let focus = store
            .state()
            .containers()
            .next()
            .map(|container| Focus::Column(container.id.clone()));

        Self {
            store,
            commits,
            dispatcher: EffectDispatcher::new(),
            registry: IdentityRegistry::new(),
            mounts: Mounts::new(),
            layout: BoardLayout::default(),
            focus,
            drag: None,
            menu: None,
            flash: None,
            status_message: String::new(),
            flash_duration: Duration::from_millis(config.flash_ms),
            announcements: config.announcements,
        }
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Registers what the last frame showed and releases what it no longer does.
    pub fn sync_mounts(&mut self) {
        self.mounts.sync(&self.registry, Mounts::visible(&self.layout));
    }

    /// Dispatches effects for the latest pending commit. Earlier notices
    /// queued since the last frame are dropped without effects. Returns
    /// whether any effect ran.
    pub fn process_commits(&mut self, now: Instant) -> bool {
        let Some(notice) = self.commits.try_iter().last() else {
            return false;
        };
        debug!("Commit notice for revision {}", notice.revision);

        let mut changed = false;
        for effect in self.dispatcher.dispatch(&notice.state, &self.registry) {
            self.execute(effect, now);
            changed = true;
        }
        changed
    }

    fn execute(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::Highlight { handle } => {
                if self.mounts.target(handle).is_some() {
                    self.flash = Some(Flash {
                        handle,
                        until: now + self.flash_duration,
                    });
                } else {
                    warn!("Highlight requested for unmounted {:?}", handle);
                }
            }
            Effect::Announce { text } => {
                info!("Announcement: {}", text);
                if self.announcements {
                    self.status_message = text;
                }
            }
            Effect::Focus { handle } => match self.mounts.target(handle) {
                Some(Target::Card(item_id) | Target::CardTrigger(item_id)) => {
                    self.focus = Some(Focus::Card(item_id.clone()));
                }
                Some(Target::Column(container_id)) => {
                    self.focus = Some(Focus::Column(container_id.clone()));
                }
                None => warn!("Focus requested for unmounted {:?}", handle),
            },
        }
    }

    /// What is highlighted at `now`, if anything.
    pub fn flashed_target(&self, now: Instant) -> Option<Target> {
        self.flash
            .filter(|flash| now < flash.until)
            .and_then(|flash| self.mounts.target(flash.handle).cloned())
    }

    /// Clears a finished flash. Returns whether one was cleared.
    pub fn expire_flash(&mut self, now: Instant) -> bool {
        if self.flash.is_some_and(|flash| now >= flash.until) {
            self.flash = None;
            return true;
        }
        false
    }

    fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Handles one input event. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Quit => return true,
            TuiEvent::Resize => return false,
            _ => {}
        }

        // When the action menu is open, route all events to it
        if let Some(menu) = self.menu.as_mut() {
            if let Some(menu_event) = menu.handle_event(&event) {
                self.menu = None;
                if let MenuEvent::Choose(command) = menu_event {
                    match command_request(self.store.state(), &command) {
                        Ok(Some(request)) => self.submit(&request),
                        Ok(None) => debug!("Command {:?} is disabled", command),
                        Err(e) => self.reject(e),
                    }
                }
            }
            return false;
        }

        match event {
            TuiEvent::Escape => {
                if self.drag.take().is_none() {
                    return true;
                }
                debug!("Drag cancelled");
            }
            TuiEvent::Submit => self.open_menu(),
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::CursorLeft
            | TuiEvent::CursorRight => self.move_focus(event),
            TuiEvent::MouseDown(x, y) => {
                let hit = self.layout.hit_test(x, y);
                if let Some(focus) = hit.as_ref().map(focus_of) {
                    self.focus = Some(focus);
                }
                self.drag = DragState::press(hit);
            }
            TuiEvent::MouseDrag(x, y) => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.motion(self.layout.hit_test(x, y));
                }
            }
            TuiEvent::MouseUp(x, y) => {
                if let Some(drag) = self.drag.take()
                    && drag.moved
                {
                    let gesture = drag.release(&self.layout, x, y);
                    self.drop_gesture(&gesture);
                }
            }
            TuiEvent::Quit | TuiEvent::Resize => {}
        }
        false
    }

    fn drop_gesture(&mut self, gesture: &Gesture) {
        match resolve_drop(self.store.state(), gesture) {
            Ok(Some(request)) => self.submit(&request),
            Ok(None) => debug!("Drop of {} landed nowhere", gesture.source_id),
            Err(e) => self.reject(e),
        }
    }

    fn submit(&mut self, request: &MoveRequest) {
        match self.store.apply(request) {
            Ok(Some(operation)) => debug!("Committed revision {}", operation.revision),
            Ok(None) => debug!("Request changed nothing"),
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: BoardError) {
        warn!("Move rejected: {}", e);
        self.status_message = format!("Move rejected: {e}");
    }

    fn open_menu(&mut self) {
        let Some(focus) = &self.focus else {
            return;
        };
        match menu_for(self.store.state(), focus) {
            Ok(menu) => self.menu = Some(menu),
            Err(e) => warn!("No action menu for {:?}: {}", focus, e),
        }
    }

    fn move_focus(&mut self, event: TuiEvent) {
        let state = self.store.state();
        let next = match &self.focus {
            Some(focus) => neighbour(state, focus, event),
            None => state
                .containers()
                .next()
                .map(|container| Focus::Column(container.id.clone())),
        };
        if let Some(next) = next {
            self.focus = Some(next);
        }
    }
}

fn focus_of(hit: &Hit) -> Focus {
    match hit {
        Hit::Card { item_id, .. } => Focus::Card(item_id.clone()),
        Hit::Header { container_id } | Hit::Column { container_id } => {
            Focus::Column(container_id.clone())
        }
    }
}

fn menu_for(state: &BoardState, focus: &Focus) -> Result<ActionMenuState, BoardError> {
    match focus {
        Focus::Card(item_id) => {
            let (container, index) = state.locate_item(item_id)?;
            let title = container.item_at(index)?.name.clone();
            Ok(ActionMenuState::new(title, item_menu(state, item_id)?))
        }
        Focus::Column(container_id) => {
            let title = state.container(container_id)?.title.clone();
            Ok(ActionMenuState::new(title, container_menu(state, container_id)?))
        }
    }
}

fn card_focus(container: &Container, index: usize) -> Option<Focus> {
    container
        .items
        .get(index)
        .map(|item| Focus::Card(item.id.clone()))
}

/// Focus reached from `focus` with one arrow key. Up from the first card
/// lands on the column; left and right keep the card row where possible.
fn neighbour(state: &BoardState, focus: &Focus, event: TuiEvent) -> Option<Focus> {
    let (container, index) = match focus {
        Focus::Column(container_id) => (state.container(container_id).ok()?, None),
        Focus::Card(item_id) => {
            let (container, index) = state.locate_item(item_id).ok()?;
            (container, Some(index))
        }
    };

    match event {
        TuiEvent::CursorUp => match index? {
            0 => Some(Focus::Column(container.id.clone())),
            i => card_focus(container, i - 1),
        },
        TuiEvent::CursorDown => card_focus(container, index.map_or(0, |i| i + 1)),
        TuiEvent::CursorLeft | TuiEvent::CursorRight => {
            let position = state.position_of_container(&container.id).ok()?;
            let target = if event == TuiEvent::CursorLeft {
                position.checked_sub(1)?
            } else {
                position + 1
            };
            let next = state.container(state.ordered_container_ids().get(target)?).ok()?;
            match index {
                Some(i) => card_focus(next, i.min(next.items.len().saturating_sub(1)))
                    .or_else(|| Some(Focus::Column(next.id.clone()))),
                None => Some(Focus::Column(next.id.clone())),
            }
        }
        _ => None,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Event types let key releases be filtered out; terminals without
        // the protocol ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse capture, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            Show
        );
    }
}

pub fn run(config: ResolvedConfig, board: BoardState) -> std::io::Result<()> {
    let mut tui = TuiState::new(board, &config);

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_terminal_mode_guard) => event_loop(&mut terminal, &mut tui),
        Err(e) => Err(e),
    };

    ratatui::restore();
    info!("Menuboard exiting at revision {}", tui.store.state().revision());
    result
}

fn event_loop(terminal: &mut DefaultTerminal, tui: &mut TuiState) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        if tui.expire_flash(now) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, tui, now))?;
            tui.sync_mounts();
            needs_redraw = false;
        }

        if tui.process_commits(now) {
            needs_redraw = true;
            continue;
        }

        // Short poll while a flash is running so it ends on time
        let timeout = if tui.is_flashing() { FLASH_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if tui.handle_event(event) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            return Ok(());
        }
    }
}
