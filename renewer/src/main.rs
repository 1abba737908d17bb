use hns_core::{error, info, log::init_logger};
use renewer_lib::{app::Renewer, args::parse_args};

#[tokio::main]
async fn main() {
    let args = parse_args();
    init_logger(args.logdir.as_deref(), &args.log_level);

    let Some(action) = args.action.clone() else {
        error!("no action given");
        std::process::exit(1);
    };

    let result = match Renewer::try_new(args) {
        Ok(renewer) => renewer.run(&action).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(report) => {
            println!("{}", report.hex);
            println!("txid: {}", report.txid);
            if let Some(fee) = report.fee {
                println!("fee: {}", fee);
            }
            if report.in_mempool == Some(true) {
                info!("{} is in the mempool", report.txid);
            }
            match report.exit_code() {
                0 => {}
                code => std::process::exit(code),
            }
        }
        Err(err) => {
            error!("{:?} failed: {}", action, err);
            std::process::exit(1);
        }
    }
}
