use springsim::frame_loop::{CancellationToken, FrameLoop, IntervalTicks, LoopExit};
use springsim::prelude::*;

fn main() {
    env_logger::init();

    let mut simulator = Simulator::builder()
        .num_spheres(20)
        .max_neighbors(2)
        .world_size(WorldSize::new(800.0, 600.0))
        .seed(2024)
        .build();

    // Grab the first sphere and pull it toward the middle.
    let key = BodyKey::indexed(0);
    if let Some(body) = simulator.bodies().get(&key) {
        let dispatcher = simulator.dispatcher();
        dispatcher.send(SimulatorEvent::PointerDown {
            key: key.clone(),
            cursor: CursorPosition(body.position),
        });
        dispatcher.send(SimulatorEvent::PointerMove(CursorPosition::new(400.0, 300.0)));
        dispatcher.send(SimulatorEvent::PointerUp);
    }

    let mut frame_loop = FrameLoop::new(IntervalTicks::per_second(60), CancellationToken::new());
    let token = frame_loop.token().clone();
    let exit = frame_loop.run(&mut simulator, |snapshot| {
        if snapshot.frame % 30 == 0 {
            match serde_json::to_string(snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("snapshot not serializable: {err}"),
            }
        }
        if snapshot.frame >= 120 {
            token.cancel();
        }
    });

    match exit {
        LoopExit::Cancelled { frames } | LoopExit::Exhausted { frames } => {
            eprintln!("ran {frames} frames")
        }
    }
}
