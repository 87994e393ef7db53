use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};
use ratatui::prelude::Rect;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{cmd::TuiCommand, msg::Msg, raw_msg::RawMsg, state::AppState},
    infrastructure::{
        api::{HttpNumberApi, NumberApi},
        api_service::ApiService,
        config::Config,
        tui::{self, real::RealTui},
    },
    integration::{renderer::Renderer, runtime::Runtime},
};

/// Drives the dashboard: terminal events in, update cycle, API requests out, redraw
pub struct AppRunner {
    runtime: Runtime,
    tui: Arc<Mutex<dyn tui::TuiLike + Send>>,
    renderer: Renderer,
    // TuiCommand receiver for executing terminal-side effects
    tui_cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
    // For service termination
    api_cancel_token: CancellationToken,
}

impl AppRunner {
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// Create an AppRunner talking to the configured HTTP API through a real terminal
    pub fn new_with_real(config: Config, tui: Arc<Mutex<RealTui>>) -> Result<Self> {
        let api = HttpNumberApi::new(&config.api)?;
        log::info!("Using number API at {}", api.base_url());
        Self::new_with_tui(config, tui, Arc::new(api))
    }

    /// Create an AppRunner with any terminal and API implementation.
    /// Must be called inside a tokio runtime: ApiService is started here.
    pub fn new_with_tui(
        config: Config,
        tui: Arc<Mutex<dyn tui::TuiLike + Send>>,
        api: Arc<dyn NumberApi>,
    ) -> Result<Self> {
        let initial_state = AppState::new_with_config(config);
        let mut runtime = Runtime::new_with_executor(initial_state);

        // Start ApiService; its responses come back through the runtime's raw channel
        let (api_cmd_tx, api_cancel_token, api_service) =
            ApiService::new(api, runtime.get_raw_sender());
        api_service.run();
        runtime.add_api_support(api_cmd_tx).map_err(|e| eyre!(e))?;

        let (tui_cmd_tx, tui_cmd_rx) = mpsc::unbounded_channel::<TuiCommand>();
        runtime.add_tui_sender(tui_cmd_tx).map_err(|e| eyre!(e))?;

        Ok(Self {
            runtime,
            tui,
            renderer: Renderer::new(),
            tui_cmd_rx,
            api_cancel_token,
        })
    }

    /// Run the main loop until the user quits or the event source closes
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;

        // Initial load of the first page and the chart
        self.runtime.send_msg(Msg::Refresh);
        let mut should_render = true;

        loop {
            let event = {
                let mut tui = self.tui.lock().await;
                tui.next().await
            };
            let Some(event) = event else {
                log::info!("Terminal event source closed");
                break;
            };

            match event {
                tui::Event::Quit | tui::Event::Closed => {
                    self.runtime.send_raw_msg(RawMsg::Quit);
                }
                tui::Event::Tick => {
                    self.runtime.send_raw_msg(RawMsg::Tick);
                }
                tui::Event::Render => {
                    self.runtime.send_raw_msg(RawMsg::Render);
                }
                tui::Event::Resize(w, h) => {
                    self.runtime.send_raw_msg(RawMsg::Resize(w, h));
                }
                tui::Event::Key(key) => {
                    self.runtime.send_raw_msg(RawMsg::Key(key));
                }
                tui::Event::Error => {
                    self.runtime
                        .send_raw_msg(RawMsg::Error("Terminal input error".to_string()));
                }
                tui::Event::Init
                | tui::Event::FocusGained
                | tui::Event::FocusLost
                | tui::Event::Paste(_)
                | tui::Event::Mouse(_) => {}
            }

            // Let ApiService and its request tasks make progress on a single-threaded runtime
            tokio::task::yield_now().await;

            should_render |= self.update_cycle();
            should_render |= self.apply_tui_commands().await?;

            if self.runtime.state().system.should_suspend {
                self.suspend().await?;
                should_render = true;
            }

            if self.runtime.state().system.should_quit {
                break;
            }

            if should_render {
                self.render().await?;
                should_render = false;
            }
        }

        // Shutdown services and exit TUI
        log::info!("Shutting down: {:?}", self.runtime.get_stats());
        self.api_cancel_token.cancel();
        self.tui.lock().await.exit()?;
        Ok(())
    }

    /// Process queued messages and execute the resulting commands.
    /// Returns whether the state may have changed.
    fn update_cycle(&mut self) -> bool {
        let before = self.runtime.processed_messages();
        if let Err(e) = self.runtime.run_update_cycle() {
            log::error!("Runtime error: {e}");
            self.runtime
                .send_raw_msg(RawMsg::Error(format!("Runtime error: {e}")));
        }
        self.runtime.processed_messages() != before
    }

    async fn apply_tui_commands(&mut self) -> Result<bool> {
        let mut applied = false;
        while let Ok(cmd) = self.tui_cmd_rx.try_recv() {
            match cmd {
                TuiCommand::Resize { width, height } => {
                    self.tui
                        .lock()
                        .await
                        .resize(Rect::new(0, 0, width, height))?;
                    applied = true;
                }
            }
        }
        Ok(applied)
    }

    async fn suspend(&mut self) -> Result<()> {
        {
            let mut tui = self.tui.lock().await;
            tui.suspend()?;
            tui.resume()?;
        }
        self.runtime.send_raw_msg(RawMsg::Resume);
        self.update_cycle();
        Ok(())
    }

    async fn render(&mut self) -> Result<()> {
        self.renderer.render(&self.tui, self.runtime.state()).await
    }
}
