use super::{ChatContext, Trigger};
use crate::core::error::StepError;
use console::style;
use std::path::PathBuf;

pub trait CommandHandler {
    fn execute(&self, ctx: &mut ChatContext, args: &[&str]) -> Result<Option<String>, StepError>;
    fn help(&self) -> &'static str;
}

pub struct PhotoCommand;
pub struct AlarmCommand;
pub struct ReviewCommand;
pub struct ResetCommand;
pub struct HelpCommand;
pub struct QuitCommand;

impl CommandHandler for PhotoCommand {
    fn execute(&self, ctx: &mut ChatContext, args: &[&str]) -> Result<Option<String>, StepError> {
        if args.is_empty() {
            return Ok(Some("사용법: /photo <이미지 파일 경로>".to_string()));
        }
        ctx.pending = Some(Trigger::Photo(PathBuf::from(args.join(" "))));
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/photo <path> - 사진을 보내 대답하기 (경로만 입력해도 돼요)"
    }
}

impl CommandHandler for AlarmCommand {
    fn execute(&self, ctx: &mut ChatContext, _args: &[&str]) -> Result<Option<String>, StepError> {
        ctx.pending = Some(Trigger::Alarm);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/alarm - 알람 체크인을 지금 실행하기"
    }
}

impl CommandHandler for ReviewCommand {
    fn execute(&self, ctx: &mut ChatContext, _args: &[&str]) -> Result<Option<String>, StepError> {
        ctx.pending = Some(Trigger::Review);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/review - 오늘의 여정 돌아보기"
    }
}

impl CommandHandler for ResetCommand {
    fn execute(&self, ctx: &mut ChatContext, _args: &[&str]) -> Result<Option<String>, StepError> {
        ctx.pending = Some(Trigger::Reset);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/reset - 오늘의 대화를 마치고 새로 시작하기"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(&self, _ctx: &mut ChatContext, _args: &[&str]) -> Result<Option<String>, StepError> {
        let title = style("사용할 수 있는 명령어").bold().underlined();
        let help_text = vec![
            title.to_string(),
            style(PhotoCommand.help()).to_string(),
            style(AlarmCommand.help()).to_string(),
            style(ReviewCommand.help()).to_string(),
            style(ResetCommand.help()).to_string(),
            style(HelpCommand.help()).to_string(),
            style(QuitCommand.help()).to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - 명령어 목록 보기"
    }
}

impl CommandHandler for QuitCommand {
    fn execute(&self, ctx: &mut ChatContext, _args: &[&str]) -> Result<Option<String>, StepError> {
        ctx.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - 대화 종료하기"
    }
}
