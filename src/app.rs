use crate::capture;
use crate::cli::Args;
use crate::commands::registry::CommandRegistry;
use crate::commands::{ChatContext, Trigger};
use crate::config::Config;
use crate::core::error::StepError;
use crate::display;
use crate::input;
use crate::prompts::ALARM_PROMPT;
use crate::session::controller::{SessionController, SubmitOutcome};
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct Application {
    pub args: Args,
    pub config: Config,
    pub controller: SessionController,
    pub commands: CommandRegistry,
}

impl Application {
    pub fn new(
        args: Args,
        config: Config,
        controller: SessionController,
        commands: CommandRegistry,
    ) -> Self {
        Self {
            args,
            config,
            controller,
            commands,
        }
    }

    pub async fn run(&mut self) -> Result<(), StepError> {
        if let Some(path) = self.args.photo.clone() {
            return self.run_photo_once(&path).await;
        }

        if self.args.alarm {
            return self.run_alarm_once().await;
        }

        if !io::stdin().is_terminal() {
            // Piped mode: the first line of stdin is a photo path
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let path = buffer.lines().next().unwrap_or("").trim();
            if path.is_empty() {
                return Err(StepError::Input("사진 파일 경로가 필요해요".to_string()));
            }
            return self.run_photo_once(Path::new(path)).await;
        }

        self.run_interactive().await
    }

    async fn run_photo_once(&self, path: &Path) -> Result<(), StepError> {
        let image = capture::capture_from_file(path)?;
        match self.controller.submit_photo(image).await {
            SubmitOutcome::Replied(reply) => {
                display::display_reply(&reply);
                Ok(())
            }
            SubmitOutcome::Busy => Err(StepError::Input(
                "이미 다른 요청이 진행 중이에요".to_string(),
            )),
        }
    }

    async fn run_alarm_once(&self) -> Result<(), StepError> {
        match self.controller.submit_text(ALARM_PROMPT).await {
            SubmitOutcome::Replied(reply) => {
                display::display_reply(&reply);
                Ok(())
            }
            SubmitOutcome::Busy => Err(StepError::Input(
                "이미 다른 요청이 진행 중이에요".to_string(),
            )),
        }
    }

    async fn run_interactive(&mut self) -> Result<(), StepError> {
        display::display_history(&self.controller.snapshot().await);
        println!(
            "\n사진 파일 경로를 입력하면 바로 전송돼요. 명령어는 '/help'로 볼 수 있어요."
        );

        let alarm_task = self.spawn_alarm();
        let mut editor = input::create_editor(self.commands.command_names())?;
        let mut ctx = ChatContext::new();

        loop {
            let Some(line) = input::read_input(&mut editor)? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.is_empty() {
                    continue;
                }
                match self.commands.execute(parts[0], &parts[1..], &mut ctx) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => display::display_notice(&e.to_string()),
                }
                if !ctx.should_continue {
                    break;
                }
            } else {
                // Camera-only chat: bare input is the shutter, a photo path
                ctx.pending = Some(Trigger::Photo(PathBuf::from(line)));
            }

            if let Some(trigger) = ctx.pending.take() {
                self.run_trigger(trigger).await;
            }
        }

        alarm_task.abort();
        input::save_history(&mut editor)?;
        Ok(())
    }

    async fn run_trigger(&self, trigger: Trigger) {
        match trigger {
            Trigger::Photo(path) => match capture::capture_from_file(&path) {
                Ok(image) => {
                    display::display_user_photo_echo();
                    self.show_outcome(self.controller.submit_photo(image).await);
                }
                // Capture failures stay local: an inline notice, no message
                // appended, busy untouched
                Err(err) => display::display_notice(&format!("사진을 불러올 수 없어요: {}", err)),
            },
            Trigger::Alarm => {
                self.show_outcome(self.controller.submit_text(ALARM_PROMPT).await);
            }
            Trigger::Review => display::display_review(&self.controller.snapshot().await),
            Trigger::Reset => {
                self.controller.reset().await;
                display::display_history(&self.controller.snapshot().await);
            }
        }
    }

    fn show_outcome(&self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Replied(reply) => display::display_reply(&reply),
            SubmitOutcome::Busy => {
                display::display_notice("잠깐만, 아직 지난 이야기에 답하는 중이야.")
            }
        }
    }

    fn spawn_alarm(&self) -> tokio::task::JoinHandle<()> {
        let controller = self.controller.clone();
        let period = self.config.alarm_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // interval fires immediately; the first check-in should wait a
            // full period
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match controller.submit_text(ALARM_PROMPT).await {
                    SubmitOutcome::Replied(reply) => {
                        println!();
                        display::display_reply(&reply);
                    }
                    SubmitOutcome::Busy => debug!("alarm tick dropped: exchange in flight"),
                }
            }
        })
    }
}
