//! `archwright pricing` - Look up unit prices for services.

use archwright_core::ArchwrightConfig;

use crate::display;

pub async fn run(config: &ArchwrightConfig, services: &[String]) -> anyhow::Result<()> {
    let pricing = super::build_pricing(config)?;
    let report = pricing.get_pricing(services).await;
    print!("{}", display::pricing_table(&report));
    Ok(())
}
