use anyhow::Result;
use clap::Args;

use super::SessionArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let cropper = args.session.open()?;
    crate::summary::print_session_summary(&cropper, &args.session.file);
    Ok(())
}
