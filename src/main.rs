use anyhow::Context;
use clap::Parser;
use xingxin_test_doc::utils::{logger, validation::Validate};
use xingxin_test_doc::{CliConfig, DocGenerator, GenerationReport, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建议: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let output_dir = std::path::absolute(&config.output)
        .with_context(|| format!("无法解析输出目录: {}", config.output))?;

    let generator = DocGenerator::new(LocalStorage::new(&output_dir), &output_dir)
        .with_catalog(config.catalog_path());

    match generator.run(&config.metadata(), &config.template) {
        Ok(report) => {
            tracing::info!(
                "Document written to {} ({} bytes)",
                report.output_path.display(),
                report.archive_size
            );
            print_summary(&report, generator.output_dir());
        }
        Err(e) => {
            tracing::error!(
                "❌ Document generation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建议: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_summary(report: &GenerationReport, output_dir: &std::path::Path) {
    println!("开始生成文档...");
    println!("  测试人员: {}", report.metadata.user);
    println!("  产品名称: {}", report.metadata.product);
    println!("  版本号: {}", report.metadata.version);
    println!("  测试日期: {}", report.metadata.date);
    println!("  测试模板: {}", report.template);
    println!("  输出目录: {}", output_dir.display());
    println!();
    println!("✅ 文档生成成功！");
    println!("   文件名: {}", report.file_name);
    println!("   路径: {}", report.output_path.display());
    println!("   测试项数量: {}", report.item_count);
}
