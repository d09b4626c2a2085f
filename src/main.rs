// ==========================================
// 员工画像看板 - 命令行入口
// ==========================================
// 加载配置的数据源，输出看板汇总；
// 设置 TALENT_BOARD_ANALYZE=<序号> 时额外请求一次 AI 画像
// ==========================================

use std::sync::Arc;

use anyhow::Context;
use talent_board::config::{AppConfig, FileCredentialStore};
use talent_board::narrative::GeminiNarrativeService;
use talent_board::{logging, AnalyzeOutcome, EmployeeApi};

/// 指定要画像的员工序号
const ANALYZE_ENV: &str = "TALENT_BOARD_ANALYZE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", talent_board::APP_NAME);
    tracing::info!("系统版本: {}", talent_board::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();

    let credentials =
        FileCredentialStore::in_user_config_dir().context("无法定位 AI 密钥存储位置")?;
    let narrative = GeminiNarrativeService::new(config.narrative.clone())
        .context("无法初始化 AI 画像服务")?;

    let api = EmployeeApi::new(config, Arc::new(narrative), Arc::new(credentials));
    tracing::info!("使用数据源: {}", api.config().db_location);

    api.load(None).await.context("员工数据加载失败")?;

    let summary = api.dashboard()?;
    println!("员工总数: {}", summary.count);
    println!("平均得分: {}", summary.average_score);
    if let Some(top) = &summary.top_performer {
        println!("最高得分: {} / {}", top.score, top.name);
    }
    println!();
    for (rank, entry) in summary.ranking.iter().enumerate() {
        println!("{:>3}. [{:>3}] {:<8} {}", rank + 1, entry.seq, entry.name, entry.score);
    }

    if let Some(raw) = std::env::var(ANALYZE_ENV).ok().filter(|v| !v.trim().is_empty()) {
        let seq: i64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{} 不是有效序号: {}", ANALYZE_ENV, raw))?;

        match api.analyze(seq).await? {
            AnalyzeOutcome::Completed(narrative) => {
                println!();
                println!("AI 画像 [{}]: {}", seq, narrative.persona);
                println!("{}", narrative.diagnosis);
            }
            AnalyzeOutcome::CredentialRequired => {
                println!();
                println!("未配置 AI 密钥，请先写入密钥文件后重试");
            }
            AnalyzeOutcome::AlreadyInFlight => {
                println!();
                println!("序号 {} 的画像请求正在进行中", seq);
            }
        }
    }

    Ok(())
}
