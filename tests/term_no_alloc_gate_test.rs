use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use classic_tetris::core::{GameSnapshot, GameState, SequenceSource};
use classic_tetris::term::{for_each_changed_run, FrameBuffer, GameView, Viewport};
use classic_tetris::types::{GameAction, PieceKind};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// Both checks live in one test so no other test thread allocates while
// counting is enabled.
#[test]
fn render_and_diff_are_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut game = GameState::new(SequenceSource::repeat(PieceKind::T));
    game.apply_action(GameAction::Confirm);

    let mut snap = GameSnapshot::default();
    let mut prev = FrameBuffer::new(viewport.width, viewport.height);
    let mut next = FrameBuffer::new(viewport.width, viewport.height);
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut prev);

    let allocs = with_alloc_counting(|| {
        for _ in 0..50 {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut next);
        }
    });
    assert_eq!(allocs, 0, "render_into allocated");

    // A moved piece produces changed runs; walking them must not allocate.
    game.apply_action(GameAction::SoftDrop);
    game.apply_action(GameAction::SoftDrop);
    game.apply_action(GameAction::MoveLeft);
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut next);

    let mut runs = 0usize;
    let mut glyphs = 0usize;
    let allocs = with_alloc_counting(|| {
        for _ in 0..50 {
            for_each_changed_run(&prev, &next, |_, _, run| {
                runs += 1;
                glyphs += run.len();
                Ok(())
            })
            .unwrap();
        }
    });
    assert_eq!(allocs, 0, "for_each_changed_run allocated");
    assert!(runs > 0);
    assert!(glyphs > 0);
}
