use clap::Parser;

/// 行程層級的旗標；rApp 本身的設定一律來自環境變數
#[derive(Debug, Clone, Parser)]
#[command(name = "a1-rapp")]
#[command(about = "Demo rApp: registers with the A1 Policy Management Service and submits a policy")]
pub struct CliArgs {
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, default_value = "0.0.0.0", help = "Address the HTTP listener binds to")]
    pub bind: String,
}
