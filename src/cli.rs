use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "사진으로 대화하는 번아웃 동반자", long_about = None)]
pub struct Args {
    /// Send a single photo and print the reply, then exit
    #[arg(short, long)]
    pub photo: Option<PathBuf>,

    /// Fire one alarm check-in and print the reply, then exit
    #[arg(short, long)]
    pub alarm: bool,

    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,
}
