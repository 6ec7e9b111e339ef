//! Terminal tables.

use sweep_core::{ImageFailure, ImageId};
use tabled::{
    builder::Builder,
    settings::{object::Rows, themes::Colorization, Color, Style},
};

const UNTAGGED: &str = "<untagged>";

pub fn image_table(image_ids: &[ImageId]) -> String {
    let mut builder = Builder::new();
    builder.push_record(["#", "TAG", "DIGEST"]);

    for (index, image_id) in image_ids.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            image_id.tag.clone().unwrap_or_else(|| UNTAGGED.to_string()),
            image_id.digest.clone().unwrap_or_default(),
        ]);
    }

    styled(builder)
}

pub fn failure_table(failures: &[ImageFailure]) -> String {
    let mut builder = Builder::new();
    builder.push_record(["IMAGE", "CODE", "REASON"]);

    for failure in failures {
        builder.push_record([
            failure
                .image_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| UNTAGGED.to_string()),
            failure.code.clone().unwrap_or_default(),
            failure.reason.clone().unwrap_or_default(),
        ]);
    }

    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Colorization::exact([Color::FG_CYAN], Rows::first()))
        .with(Style::rounded());
    table.to_string()
}
