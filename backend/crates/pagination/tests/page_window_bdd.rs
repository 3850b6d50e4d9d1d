//! Behavioural coverage for offset clamping and navigation offsets.

use std::cell::RefCell;

use pagination::{PageSize, PageWindow};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct WindowWorld {
    total: RefCell<u64>,
    window: RefCell<Option<PageWindow>>,
}

impl WindowWorld {
    fn window(&self) -> PageWindow {
        self.window
            .borrow()
            .expect("a window should have been requested")
    }

    /// Number of records a store would return for the current window.
    fn page_len(&self) -> u64 {
        let window = self.window();
        let remaining = window.total().saturating_sub(window.offset());
        remaining.min(u64::from(window.limit()))
    }
}

#[fixture]
fn world() -> WindowWorld {
    WindowWorld::default()
}

#[given("{total} matching records")]
fn matching_records(world: &WindowWorld, total: u64) {
    *world.total.borrow_mut() = total;
}

#[when("offset {offset} is requested")]
fn offset_is_requested(world: &WindowWorld, offset: i64) {
    let total = *world.total.borrow();
    *world.window.borrow_mut() = Some(PageWindow::new(total, PageSize::DEFAULT, offset));
}

#[then("the effective offset is {offset}")]
fn the_effective_offset_is(world: &WindowWorld, offset: u64) {
    assert_eq!(world.window().offset(), offset);
}

#[then("the next offset is {offset}")]
fn the_next_offset_is(world: &WindowWorld, offset: i64) {
    assert_eq!(world.window().next_offset(), offset);
}

#[then("the previous offset is {offset}")]
fn the_previous_offset_is(world: &WindowWorld, offset: i64) {
    assert_eq!(world.window().prev_offset(), offset);
}

#[then("the page holds {count} records")]
fn the_page_holds(world: &WindowWorld, count: u64) {
    assert_eq!(world.page_len(), count);
}

#[scenario(
    path = "tests/features/page_window.feature",
    name = "Negative offsets start at the first record"
)]
fn negative_offsets_start_at_the_first_record(world: WindowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/page_window.feature",
    name = "Offsets past the end land on the record count"
)]
fn offsets_past_the_end_land_on_the_record_count(world: WindowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/page_window.feature",
    name = "A full single page links past the end"
)]
fn a_full_single_page_links_past_the_end(world: WindowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/page_window.feature",
    name = "Following the next link of a full single page yields an empty page"
)]
fn following_next_of_a_full_page_yields_an_empty_page(world: WindowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/page_window.feature",
    name = "An empty result set clamps to zero"
)]
fn an_empty_result_set_clamps_to_zero(world: WindowWorld) {
    drop(world);
}
