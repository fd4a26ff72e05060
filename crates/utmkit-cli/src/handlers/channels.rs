//! Channel catalog command handler

use crate::error::Result;
use crate::output::OutputWriter;
use utmkit_core::Channel;

/// Handle the channels command
pub fn handle_channels(output: &mut OutputWriter) -> Result<()> {
    let channels = Channel::all();

    if !output.is_human() {
        return output.data(&channels);
    }

    output.section("Marketing Channels")?;
    let rows = channels
        .iter()
        .map(|c| {
            vec![
                c.name.to_string(),
                c.source.to_string(),
                c.medium.to_string(),
                if c.show_term { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    output.table(&["Name", "Source", "Medium", "Term"], rows)
}
