use springsim::frame_loop::{CancellationToken, FixedTicks, FrameLoop, IntervalTicks, LoopExit};
use springsim::prelude::*;
use std::time::Duration;

fn simulator() -> Simulator {
    Simulator::builder()
        .num_spheres(8)
        .world_size(WorldSize::new(400.0, 300.0))
        .seed(5)
        .build()
}

#[test]
fn fixed_ticks_run_to_exhaustion() {
    let mut simulator = simulator();
    let mut seen = Vec::new();
    let exit = FrameLoop::new(FixedTicks::new(5), CancellationToken::new())
        .run(&mut simulator, |snapshot| seen.push(snapshot.frame));

    assert_eq!(exit, LoopExit::Exhausted { frames: 5 });
    assert_eq!(simulator.frame(), 5);
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn cancel_from_callback_stops_after_current_frame() {
    let mut simulator = simulator();
    let mut frame_loop = FrameLoop::new(FixedTicks::new(100), CancellationToken::new());
    let token = frame_loop.token().clone();

    let exit = frame_loop.run(&mut simulator, |snapshot| {
        if snapshot.frame == 3 {
            token.cancel();
        }
    });

    assert_eq!(exit, LoopExit::Cancelled { frames: 3 });
    assert_eq!(simulator.frame(), 3);
}

#[test]
fn cancelled_token_runs_no_frames() {
    let mut simulator = simulator();
    let token = CancellationToken::new();
    token.cancel();

    let exit = FrameLoop::new(FixedTicks::new(10), token).run(&mut simulator, |_| {});
    assert_eq!(exit, LoopExit::Cancelled { frames: 0 });
    assert_eq!(simulator.frame(), 0);
}

#[test]
fn paced_loop_honors_frame_limit() {
    let mut simulator = simulator();
    let ticks = IntervalTicks::new(Duration::from_millis(2)).limit(4);
    let exit = FrameLoop::new(ticks, CancellationToken::new()).run(&mut simulator, |_| {});
    assert_eq!(exit, LoopExit::Exhausted { frames: 4 });
}

#[test]
fn cancel_from_another_thread() {
    let mut simulator = simulator();
    let mut frame_loop = FrameLoop::new(IntervalTicks::per_second(200), CancellationToken::new());
    let token = frame_loop.token().clone();

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        token.cancel();
    });
    let exit = frame_loop.run(&mut simulator, |_| {});
    canceller.join().unwrap();

    match exit {
        LoopExit::Cancelled { frames } => assert_eq!(frames, simulator.frame()),
        other => panic!("unexpected exit {other:?}"),
    }
}
