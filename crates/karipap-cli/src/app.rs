//! Interactive terminal front end.

use karipap_sdk::DetectorClient;
use tracing::info;

use crate::app_state::{AppController, Effect, ViewState};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::keys::{message_for_key, message_for_paste};
use crate::tui::{self, Action, EventHandler};
use crate::update::update;
use crate::ui;

const TICK_MS: u64 = 120;

pub struct App {
    state: ViewState,
    runner: EffectRunner,
}

impl App {
    pub fn new(state: ViewState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.runner.run(effect);
        }
    }
}

impl AppController for App {
    fn update(&mut self, action: Action) {
        let message = match action {
            Action::Tick => {
                self.state.ticks = self.state.ticks.wrapping_add(1);
                return;
            }
            Action::Resize(..) => return,
            Action::Key(key) => match message_for_key(&self.state, key) {
                Some(message) => message,
                None => return,
            },
            Action::Paste(text) => message_for_paste(&self.state, text),
            Action::App(message) => message,
        };
        let effects = update(&mut self.state, message);
        self.run_effects(effects);
    }

    fn render(&mut self, f: &mut ratatui::Frame) {
        ui::draw(f, &self.state);
    }

    fn should_quit(&self) -> bool {
        self.state.should_quit
    }
}

/// Run the TUI until the user quits.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let client = DetectorClient::with_timeout(config.endpoints.clone(), config.request_timeout)?;
    info!(backend = %config.endpoints, "starting TUI");

    let mut events = EventHandler::new(TICK_MS);
    let runner = EffectRunner::new(client, events.get_sender());
    let mut app = App::new(ViewState::new(&config), runner);
    app.run_effects(vec![Effect::CheckHealth { announce: false }]);

    let mut terminal = tui::init()?;
    let result = event_loop(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;
    result
}

async fn event_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        let Some(action) = events.next_async().await else {
            break;
        };
        app.update(action);
        if app.should_quit() {
            break;
        }
    }
    info!("TUI closed");
    Ok(())
}
