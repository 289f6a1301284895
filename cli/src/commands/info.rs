use lanwatch_common::config::Settings;
use lanwatch_common::network::interface;

use crate::terminal::print;

pub fn info(settings: &Settings) -> anyhow::Result<()> {
    let lan = interface::discover()?;
    let subnet = lan.subnet()?;

    print::header("interface", settings.quiet);
    print::aligned_line("interface", &lan.name);
    print::aligned_line("address", &format!("{}/{}", lan.ip, lan.prefix));
    print::aligned_line("mac", &lan.mac.to_string());
    print::aligned_line("network", &subnet.network().to_string());
    print::aligned_line("broadcast", &subnet.broadcast().to_string());
    print::aligned_line("usable hosts", &subnet.host_count().to_string());
    Ok(())
}
