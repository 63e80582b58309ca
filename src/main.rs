use clap::Parser;
use doc_search_index::build::BuildOptions;
use doc_search_index::cli::{Cli, Commands, OutputFormat};
use doc_search_index::codec::Format;
use doc_search_index::logging;
use doc_search_index::tools::{
    BuildRequest, ConvertRequest, ListRequest, execute_build, execute_check, execute_convert,
    execute_list, format_build_response, format_check_response,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so listings on stdout stay pipeable
    logging::init(cli.verbose);

    match cli.command {
        Commands::Build {
            root,
            output,
            format,
            force,
        } => {
            let format = format.map(|f| match f {
                OutputFormat::Js => Format::Js,
                OutputFormat::Json => Format::Json { pretty: false },
            });
            let request = BuildRequest {
                root,
                options: BuildOptions {
                    output,
                    format,
                    force,
                },
            };
            let outcome = execute_build(request).await.inspect_err(|e| {
                tracing::error!("Build failed: {:#}", e);
            })?;
            print!("{}", format_build_response(&outcome));
        }
        Commands::Check { file } => {
            let report = execute_check(&file).await?;
            print!("{}", format_check_response(&file, &report));
        }
        Commands::List {
            file,
            category,
            page,
        } => {
            let listing = execute_list(ListRequest {
                file,
                category,
                page,
            })
            .await?;
            print!("{}", listing);
        }
        Commands::Convert {
            input,
            output,
            pretty,
            variable,
        } => {
            let count = execute_convert(ConvertRequest {
                input,
                output: output.clone(),
                pretty,
                variable,
            })
            .await?;
            println!("Wrote {} records to {}", count, output.display());
        }
    }

    Ok(())
}
