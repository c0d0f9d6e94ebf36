mod common;

use common::builders::{image, text, video, video_once};
use common::mocks::MockEngine;

use atlas::models::Slide;
use atlas::player::{CarouselController, PlaybackDefaults, PlayerPool};
use std::sync::Arc;

const PAGE_WIDTH: f64 = 390.0;
const VIDEO_URI: &str = "https://example.com/b.mp4";

fn controller(slides: Vec<Slide>) -> (Arc<MockEngine>, Arc<PlayerPool>, CarouselController) {
    let engine = MockEngine::new();
    let pool = Arc::new(PlayerPool::new(engine.clone()));
    let carousel = CarouselController::new(slides, pool.clone(), PlaybackDefaults::default());
    (engine, pool, carousel)
}

fn settle(carousel: &mut CarouselController, index: usize) {
    carousel
        .on_scroll_settled(index as f64 * PAGE_WIDTH, PAGE_WIDTH)
        .unwrap();
}

#[test]
fn only_video_slides_reach_the_pool() {
    let slides = vec![
        image("a", "https://example.com/a.jpg"),
        video("b", VIDEO_URI),
        text("c", "Device selection"),
    ];
    let (engine, _pool, mut carousel) = controller(slides);

    settle(&mut carousel, 1);
    let handle = engine.handle_for(VIDEO_URI).unwrap();
    assert_eq!(engine.created(), vec![VIDEO_URI.to_string()]);
    assert_eq!(handle.play_calls(), 1);
    assert!(handle.is_playing());

    settle(&mut carousel, 2);
    assert_eq!(handle.pause_calls(), 1);
    assert!(!handle.is_playing());

    // The image and text slides never produced pool traffic.
    assert_eq!(engine.total_created(), 1);
}

#[test]
fn settling_on_the_same_index_is_a_no_op() {
    let (engine, _pool, mut carousel) = controller(vec![video("b", VIDEO_URI)]);

    settle(&mut carousel, 0);
    settle(&mut carousel, 0);
    settle(&mut carousel, 0);

    let handle = engine.handle_for(VIDEO_URI).unwrap();
    assert_eq!(handle.play_calls(), 1);
    assert_eq!(engine.total_created(), 1);
}

#[test]
fn at_most_one_handle_plays_at_a_time() {
    let slides = vec![
        video("v0", "https://example.com/0.mp4"),
        video("v1", "https://example.com/1.mp4"),
        video("v2", "https://example.com/2.mp4"),
    ];
    let (engine, _pool, mut carousel) = controller(slides);

    for index in [0, 1, 2, 1, 0] {
        settle(&mut carousel, index);
        assert_eq!(engine.playing_count(), 1, "after settling on {index}");
    }
}

#[test]
fn returning_to_a_slide_reuses_its_handle() {
    let slides = vec![
        video("v0", "https://example.com/0.mp4"),
        video("v1", "https://example.com/1.mp4"),
    ];
    let (engine, _pool, mut carousel) = controller(slides);

    settle(&mut carousel, 0);
    settle(&mut carousel, 1);
    settle(&mut carousel, 0);

    assert_eq!(engine.created_for("https://example.com/0.mp4"), 1);
    assert_eq!(
        engine
            .handle_for("https://example.com/0.mp4")
            .unwrap()
            .play_calls(),
        2
    );
}

#[test]
fn out_of_bounds_settles_clamp() {
    let (engine, _pool, mut carousel) = controller(vec![
        image("a", "https://example.com/a.jpg"),
        video("b", VIDEO_URI),
    ]);

    settle(&mut carousel, 10);
    assert_eq!(carousel.active_index(), Some(1));
    assert_eq!(engine.created_for(VIDEO_URI), 1);

    carousel.on_scroll_settled(-500.0, PAGE_WIDTH).unwrap();
    assert_eq!(carousel.active_index(), Some(0));
}

#[test]
fn empty_sequence_never_touches_the_pool() {
    let (engine, _pool, mut carousel) = controller(Vec::new());

    carousel.on_scroll_settled(780.0, PAGE_WIDTH).unwrap();
    carousel.activate(5).unwrap();

    assert_eq!(carousel.active_index(), None);
    assert_eq!(engine.total_created(), 0);
}

#[test]
fn in_flight_scrolling_with_no_page_width_is_ignored() {
    let (engine, _pool, mut carousel) = controller(vec![video("b", VIDEO_URI)]);

    carousel.on_scroll_settled(123.0, 0.0).unwrap();

    assert_eq!(carousel.active_index(), None);
    assert_eq!(engine.total_created(), 0);
}

#[test]
fn share_links_resolve_to_one_stable_pool_key() {
    let share = "https://drive.google.com/file/d/1LCtEUlyvGjhyS7uZ03wlwUfA8tF4ue5y/view?usp=drive_link";
    let direct = "https://drive.google.com/uc?export=download&id=1LCtEUlyvGjhyS7uZ03wlwUfA8tF4ue5y";
    let slides = vec![video("v", share), image("i", "https://example.com/a.jpg")];
    let (engine, pool, mut carousel) = controller(slides);

    settle(&mut carousel, 0);
    settle(&mut carousel, 1);
    settle(&mut carousel, 0);

    assert_eq!(engine.created(), vec![direct.to_string()]);
    assert!(pool.has(direct));
}

#[test]
fn content_update_clamps_the_active_index() {
    let slides = vec![
        video("v0", "https://example.com/0.mp4"),
        video("v1", "https://example.com/1.mp4"),
        video("v2", "https://example.com/2.mp4"),
    ];
    let (_engine, _pool, mut carousel) = controller(slides);
    settle(&mut carousel, 2);

    carousel.set_slides(vec![video("v0", "https://example.com/0.mp4")]);
    assert_eq!(carousel.active_index(), Some(0));

    carousel.set_slides(Vec::new());
    assert_eq!(carousel.active_index(), None);
}

#[test]
fn creation_failure_propagates_but_the_index_advances() {
    let (engine, _pool, mut carousel) = controller(vec![video("b", VIDEO_URI)]);
    engine.fail_creation_for(VIDEO_URI);

    let result = carousel.on_scroll_settled(0.0, PAGE_WIDTH);

    assert!(result.is_err());
    assert_eq!(carousel.active_index(), Some(0));
}

#[test]
fn creation_setup_applies_slide_loop_flag_and_mute_default() {
    let engine = MockEngine::new();
    let pool = Arc::new(PlayerPool::new(engine.clone()));
    let mut carousel = CarouselController::new(
        vec![video_once("b", VIDEO_URI)],
        pool,
        PlaybackDefaults { start_muted: true },
    );

    settle(&mut carousel, 0);

    let handle = engine.handle_for(VIDEO_URI).unwrap();
    assert_eq!(handle.looping(), Some(false));
    assert_eq!(handle.muted(), Some(true));
}
