use tracing::{debug, info, instrument};

use crate::{
    Result,
    cli::Invocation,
    config::Config,
    dictionary::Reflection,
    docs::{DocGenerator, TempStub, render_stub, walk},
};

/// Generates documentation for the application named by `invocation`.
///
/// Resolves the application, renders its stub into a fresh temporary file,
/// runs the generator on it and removes the file again. The file only
/// exists once rendering has succeeded, and it is removed whether or not the
/// generator succeeds.
///
/// # Errors
///
/// Returns the first failure among resolution, dictionary loading, stub
/// rendering, temporary file creation and the generator run.
#[instrument(skip_all, fields(selector = %invocation.selector, criterion = %invocation.criterion))]
pub fn run(invocation: &Invocation, config: &Config, reflection: &dyn Reflection) -> Result<()> {
    let handle = invocation
        .selector
        .resolve(reflection, &invocation.criterion)?;
    info!(name = %handle.name, location = %handle.location.display(), "resolved application");

    let module = reflection.interface_module(&handle)?;
    debug!(module = %module.name, constants = module.constants.len(), "loaded interface module");

    let fragments = walk(&module)?;
    let stub = render_stub(
        &handle.name,
        &module.name,
        &fragments,
        &config.stub.render_options(),
    );

    let temp = TempStub::create(
        &config.generator.tmp_dir(),
        &handle.name,
        &config.generator.extension,
        &stub,
    )?;

    let result = DocGenerator::new()
        .with_program(&config.generator.program)
        .invoke(&invocation.passthrough, temp.path());

    drop(temp);
    result
}
