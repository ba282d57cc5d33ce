//! Per-table sticky state and scroll/resize dispatch.
//!
//! `ScrollDispatcher` owns the rendering surface and an arena of table
//! instances. Hosts forward their scroll and resize signals to
//! [`ScrollDispatcher::handle_scroll`] and [`ScrollDispatcher::handle_resize`];
//! every Ready table is re-evaluated synchronously.

use serde::Serialize;

use crate::columns;
use crate::config::StickyConfig;
use crate::decision::{decide, Placement};
use crate::error::{Result, StickyError};
use crate::geometry::{GeometrySnapshot, StickyPair, TableParts};
use crate::style::{self, FOOTER_Z_INDEX, HEADER_Z_INDEX};
use crate::surface::{RenderSurface, TablePart};

/// Stable reference to a table registered with a [`ScrollDispatcher`].
///
/// Handles outlive their table: once detached, the slot's generation moves on
/// and the old handle is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableHandle {
    index: u32,
    generation: u32,
}

impl TableHandle {
    pub fn index(self) -> u32 {
        self.index
    }
}

/// Setup progress of a table slot.
#[derive(Debug)]
pub enum TableState<E> {
    /// Registered, clones not yet created.
    Uninitialized,
    /// Clones inserted, geometry measured, listening for scroll.
    Ready(Box<TableInstance<E>>),
}

/// Everything one sticky table owns.
#[derive(Debug)]
pub struct TableInstance<E> {
    config: StickyConfig,
    parts: TableParts<E>,
    snapshot: GeometrySnapshot,
    header_placement: Option<Placement>,
    footer_placement: Option<Placement>,
}

impl<E> TableInstance<E> {
    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    pub fn parts(&self) -> &TableParts<E> {
        &self.parts
    }

    pub fn snapshot(&self) -> &GeometrySnapshot {
        &self.snapshot
    }

    /// Last placement written to the sticky header, if any.
    pub fn header_placement(&self) -> Option<Placement> {
        self.header_placement
    }

    /// Last placement written to the sticky footer, if any.
    pub fn footer_placement(&self) -> Option<Placement> {
        self.footer_placement
    }
}

#[derive(Debug)]
struct Entry<E> {
    table: E,
    state: TableState<E>,
}

#[derive(Debug)]
struct Slot<E> {
    generation: u32,
    entry: Option<Entry<E>>,
}

/// Arena of sticky tables sharing one rendering surface.
#[derive(Debug)]
pub struct ScrollDispatcher<S: RenderSurface> {
    surface: S,
    slots: Vec<Slot<S::Element>>,
}

impl<S: RenderSurface> ScrollDispatcher<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            slots: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts that change layout (e.g. headless tests).
    /// Call [`Self::handle_resize`] afterwards so snapshots catch up.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Make `table`'s header and/or footer sticky.
    ///
    /// Setup runs once per table and ends by evaluating the current scroll
    /// offset. Applying an already Ready table only re-evaluates it and
    /// returns its handle; the options it was first applied with stay in
    /// effect and a differing `config` is ignored (detach first to change
    /// them).
    ///
    /// # Errors
    /// Returns [`StickyError::Config`] if `config` fails validation.
    pub fn apply(&mut self, table: &S::Element, config: StickyConfig) -> Result<TableHandle> {
        config.validate()?;

        if let Some(handle) = self.handle_for(table) {
            let scroll_top = self.surface.scroll_top();
            if let Some(TableState::Ready(instance)) =
                entry_mut(&mut self.slots, handle).map(|e| &mut e.state)
            {
                if instance.config != config {
                    log::debug!(
                        "[sticky] table {} already applied, keeping its options",
                        handle.index
                    );
                }
                evaluate(&mut self.surface, instance, scroll_top);
                return Ok(handle);
            }
        }

        let handle = self.allocate(table);
        let instance = setup(&mut self.surface, table, config);
        if let Some(entry) = entry_mut(&mut self.slots, handle) {
            entry.state = TableState::Ready(Box::new(instance));
        }
        log::debug!("[sticky] table {} ready", handle.index);
        Ok(handle)
    }

    /// Handle of a registered table, if any.
    pub fn handle_for(&self, table: &S::Element) -> Option<TableHandle> {
        self.slots.iter().enumerate().find_map(|(i, slot)| {
            let entry = slot.entry.as_ref()?;
            (entry.table == *table).then(|| TableHandle {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                generation: slot.generation,
            })
        })
    }

    pub fn state(&self, handle: TableHandle) -> Option<&TableState<S::Element>> {
        self.entry(handle).map(|e| &e.state)
    }

    /// The Ready instance behind `handle`.
    pub fn instance(&self, handle: TableHandle) -> Option<&TableInstance<S::Element>> {
        match self.state(handle)? {
            TableState::Ready(instance) => Some(instance.as_ref()),
            TableState::Uninitialized => None,
        }
    }

    /// Number of live tables.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the scroll offset once and re-evaluate every table.
    pub fn handle_scroll(&mut self) {
        let scroll_top = self.surface.scroll_top();
        self.scroll_to(scroll_top);
    }

    /// Re-evaluate every table at `scroll_top`.
    pub fn scroll_to(&mut self, scroll_top: f64) {
        let surface = &mut self.surface;
        for instance in ready_instances(&mut self.slots) {
            evaluate(surface, instance, scroll_top);
        }
    }

    /// Re-measure, re-sync columns and re-style every table, then evaluate it
    /// at the current scroll offset.
    pub fn handle_resize(&mut self) {
        let scroll_top = self.surface.scroll_top();
        let surface = &mut self.surface;
        for instance in ready_instances(&mut self.slots) {
            remeasure(surface, instance);
            evaluate(surface, instance, scroll_top);
        }
    }

    /// Remove the sticky copies of one table and restore its originals.
    ///
    /// # Errors
    /// Returns [`StickyError::UnknownTable`] for a stale or foreign handle.
    pub fn detach(&mut self, handle: TableHandle) -> Result<()> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation && s.entry.is_some())
            .ok_or(StickyError::UnknownTable(handle))?;
        let entry = slot.entry.take();
        slot.generation = slot.generation.wrapping_add(1);

        if let Some(Entry {
            state: TableState::Ready(instance),
            ..
        }) = entry
        {
            teardown(&mut self.surface, &instance);
        }
        log::debug!("[sticky] table {} detached", handle.index);
        Ok(())
    }

    /// Detach every table.
    pub fn detach_all(&mut self) {
        let handles: Vec<_> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.entry.is_some())
            .map(|(i, s)| TableHandle {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                generation: s.generation,
            })
            .collect();
        for handle in handles {
            let _ = self.detach(handle);
        }
    }

    fn allocate(&mut self, table: &S::Element) -> TableHandle {
        let entry = Entry {
            table: table.clone(),
            state: TableState::Uninitialized,
        };
        if let Some((i, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.entry.is_none())
        {
            slot.entry = Some(entry);
            return TableHandle {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        TableHandle {
            index: u32::try_from(self.slots.len() - 1).unwrap_or(u32::MAX),
            generation: 0,
        }
    }

    fn entry(&self, handle: TableHandle) -> Option<&Entry<S::Element>> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)?
            .entry
            .as_ref()
    }
}

fn entry_mut<E>(slots: &mut [Slot<E>], handle: TableHandle) -> Option<&mut Entry<E>> {
    slots
        .get_mut(handle.index as usize)
        .filter(|s| s.generation == handle.generation)?
        .entry
        .as_mut()
}

fn ready_instances<E>(slots: &mut [Slot<E>]) -> impl Iterator<Item = &mut TableInstance<E>> {
    slots.iter_mut().filter_map(|slot| match &mut slot.entry {
        Some(Entry {
            state: TableState::Ready(instance),
            ..
        }) => Some(&mut **instance),
        _ => None,
    })
}

/// Clone one section next to its original and tag both with their classes.
fn make_sticky<S: RenderSurface>(
    surface: &mut S,
    table: &S::Element,
    part: TablePart,
    original_class: &str,
    cloned_class: &str,
) -> Option<StickyPair<S::Element>> {
    let Some(original) = surface.find_part(table, part) else {
        log::warn!("[sticky] no {part:?} section, sticking disabled for it");
        return None;
    };
    let Some(sticky) = surface.clone_after(&original) else {
        log::warn!("[sticky] could not clone {part:?} section");
        return None;
    };
    surface.add_class(&sticky, cloned_class);
    surface.add_class(&original, original_class);
    Some(StickyPair { original, sticky })
}

fn setup<S: RenderSurface>(
    surface: &mut S,
    table: &S::Element,
    config: StickyConfig,
) -> TableInstance<S::Element> {
    let header = if config.stick_header {
        make_sticky(
            surface,
            table,
            TablePart::Header,
            &config.original_header_class_name,
            &config.cloned_header_class_name,
        )
    } else {
        None
    };
    let footer = if config.stick_footer {
        make_sticky(
            surface,
            table,
            TablePart::Footer,
            &config.original_footer_class_name,
            &config.cloned_footer_class_name,
        )
    } else {
        None
    };

    let mut instance = TableInstance {
        parts: TableParts {
            table: table.clone(),
            header,
            footer,
            body: surface.find_part(table, TablePart::Body),
        },
        config,
        snapshot: GeometrySnapshot::default(),
        header_placement: None,
        footer_placement: None,
    };
    remeasure(surface, &mut instance);

    let scroll_top = surface.scroll_top();
    evaluate(surface, &mut instance, scroll_top);
    instance
}

/// Geometry refresh, column sync and setup styling, in that order.
fn remeasure<S: RenderSurface>(surface: &mut S, instance: &mut TableInstance<S::Element>) {
    instance.snapshot = GeometrySnapshot::refresh(&*surface, &instance.parts, &instance.config);

    if let Some(pair) = &instance.parts.header {
        columns::sync_widths(surface, TablePart::Header, &pair.original, &pair.sticky);
        if let Some(geometry) = instance.snapshot.header {
            style::prepare(
                surface,
                &pair.sticky,
                HEADER_Z_INDEX,
                geometry.width,
                geometry.offset_top,
            );
        }
    }
    if let Some(pair) = &instance.parts.footer {
        columns::sync_widths(surface, TablePart::Footer, &pair.original, &pair.sticky);
        if let Some(geometry) = instance.snapshot.footer {
            style::prepare(
                surface,
                &pair.sticky,
                FOOTER_Z_INDEX,
                geometry.width,
                geometry.offset_top,
            );
        }
    }
    // Styling was reset, so the next decision must be written out again.
    instance.header_placement = None;
    instance.footer_placement = None;
}

fn evaluate<S: RenderSurface>(
    surface: &mut S,
    instance: &mut TableInstance<S::Element>,
    scroll_top: f64,
) {
    let viewport_height = surface.viewport_height();
    let (header, footer) = decide(
        scroll_top,
        viewport_height,
        &instance.snapshot,
        &instance.config,
    );

    if let (Some(pair), Some(placement)) = (&instance.parts.header, header) {
        place(surface, pair, &mut instance.header_placement, placement);
    }
    if let (Some(pair), Some(placement)) = (&instance.parts.footer, footer) {
        place(surface, pair, &mut instance.footer_placement, placement);
    }
}

/// Write `placement` unless it is already in effect.
fn place<S: RenderSurface>(
    surface: &mut S,
    pair: &StickyPair<S::Element>,
    current: &mut Option<Placement>,
    placement: Placement,
) {
    if *current == Some(placement) {
        return;
    }
    match placement {
        Placement::Fixed { .. } => style::conceal(surface, &pair.original, &pair.sticky),
        // Original is still above the fold while rolling off.
        Placement::RollingOff { .. } => {}
        Placement::Unstuck => style::reveal(surface, &pair.original, &pair.sticky),
    }
    style::pin(surface, &pair.sticky, placement.position(), placement.top());
    log::trace!("[sticky] {:?} -> {:?}", current, placement);
    *current = Some(placement);
}

fn teardown<S: RenderSurface>(surface: &mut S, instance: &TableInstance<S::Element>) {
    let config = &instance.config;
    for (pair, class) in [
        (&instance.parts.header, &config.original_header_class_name),
        (&instance.parts.footer, &config.original_footer_class_name),
    ] {
        if let Some(pair) = pair {
            surface.remove(&pair.sticky);
            surface.remove_class(&pair.original, class);
            surface.remove_style(&pair.original, "visibility");
        }
    }
}
