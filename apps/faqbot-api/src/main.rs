use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = faqbot_api::Args::parse();

	faqbot_api::run(args).await
}
