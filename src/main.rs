use grid_snake::audio::VOLUME_STEP;
use grid_snake::hud::HUD_HEIGHT;
use grid_snake::input::{self, Command, Keyboard};
use grid_snake::persistence::{HighscoreStore, JsonFileStore};
use grid_snake::render::{self, Layout, Snapshot};
use grid_snake::{Collaborators, FrameScheduler, Game, GameConfig};
use macroquad::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

const BACKGROUND: Color = Color::new(0.03, 0.04, 0.05, 1.0);

fn window_conf() -> Conf {
    // Runs before the logger exists; main loads the config again with logging.
    let config = GameConfig::load();
    Conf {
        window_title: "Snake".to_owned(),
        window_width: config.board_pixels() as i32,
        window_height: (config.board_pixels() + HUD_HEIGHT) as i32,
        high_dpi: true,
        ..Default::default()
    }
}

fn now_ms() -> f64 {
    get_time() * 1000.0
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    let store = JsonFileStore::new(&config.save_path);
    let highscore = store.load();
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!(
        "starting {0}x{0} board at {1} ticks/s, seed {seed}, highscore {highscore}",
        config.grid_size,
        config.ticks_per_second
    );

    let mut game = Game::new(config.grid_size, highscore, seed)
        .with_queue_capacity(config.input_queue_capacity);
    let mut scheduler = FrameScheduler::new(config.ticks_per_second, now_ms())
        .with_max_ticks_per_frame(config.max_ticks_per_frame);
    let mut collab = Collaborators::new(store);
    let mut keyboard = Keyboard::new();

    loop {
        let keys = keyboard.poll();
        let mut interacted = keys.any();
        let mut commands = keys.drain_commands();

        if is_mouse_button_pressed(MouseButton::Left) {
            interacted = true;
            let (x, y) = mouse_position();
            let screen = (screen_width(), screen_height());
            if let Some(command) = collab.click(x, y, screen, game.grid_size(), now_ms()) {
                commands.push(command);
            }
        }

        // Audio may only start after the player has done something.
        if interacted && collab.sound.wants_enable() {
            collab.sound.enable().await;
        }

        if commands.contains(&Command::Quit) {
            break;
        }
        for command in commands {
            match command {
                Command::VolumeDown => collab.adjust_volume(-VOLUME_STEP),
                Command::VolumeUp => collab.adjust_volume(VOLUME_STEP),
                _ => input::dispatch(&mut game, command),
            }
        }
        collab.deliver(&mut game, &mut scheduler, now_ms());

        let report = scheduler.frame(now_ms(), &mut game);
        collab.deliver(&mut game, &mut scheduler, now_ms());

        clear_background(BACKGROUND);
        let layout = Layout::fit(screen_width(), screen_height(), HUD_HEIGHT, game.grid_size());
        render::draw(&Snapshot::capture(game.state(), report.alpha), &layout);
        collab.hud.draw();

        next_frame().await;
    }

    log::info!("bye, highscore {}", game.state().highscore);
}
