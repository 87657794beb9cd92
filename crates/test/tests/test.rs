#[jobcheck_test::test]
fn sync_test() {
  log::info!("Hello, world!");
  log::trace!("Hello, world!");

  assert_eq!(log::max_level(), log::LevelFilter::Trace);
}

#[jobcheck_test::test]
async fn async_test() -> Result<(), ()> {
  log::info!("Hello, world!");
  log::warn!("Hello, world!");
  log::error!("Hello, world!");
  log::debug!("Hello, world!");
  log::trace!("Hello, world!");

  let value = tokio::spawn(async { 42 }).await.map_err(|_| ())?;
  assert_eq!(value, 42);
  assert_eq!(log::max_level(), log::LevelFilter::Trace);

  Ok(())
}

#[jobcheck_test::test(condor)]
fn condor_required() -> Result<(), ()> {
  // Only runs where `condor_q -totals` succeeds
  let output = std::process::Command::new("condor_q")
    .arg("-totals")
    .output()
    .map_err(|_| ())?;

  assert!(output.status.success());

  Ok(())
}
