mod bullet_points;
mod prompt;

pub use bullet_points::{BulletPointPrinter, LineWriter, StdoutLineWriter};
#[cfg(test)]
pub use bullet_points::testutils::RecordingLineWriter;
pub use prompt::{prompt, prompt_secret};
