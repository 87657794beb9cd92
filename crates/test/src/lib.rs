use proc_macro::TokenStream;
use quote::quote;
use std::sync::OnceLock;
use syn::{
  parse::{Parse, ParseStream},
  ItemFn,
};

static IS_SUPPORT_CONDOR: OnceLock<bool> = OnceLock::new();

fn is_support_condor() -> bool {
  *IS_SUPPORT_CONDOR.get_or_init(|| {
    // Check if the HTCondor client is installed and a schedd answers
    std::process::Command::new("condor_q")
      .arg("-totals")
      .output()
      .map_or(false, |output| output.status.success())
  })
}

struct Args {
  requires_condor: bool,
}

impl Parse for Args {
  fn parse(input: ParseStream) -> syn::Result<Self> {
    match input.parse::<syn::Ident>() {
      Ok(ident) => Ok(Self {
        requires_condor: ident == "condor",
      }),
      Err(_) => Ok(Self {
        requires_condor: false,
      }),
    }
  }
}

/// Test attribute that installs the logger before the body runs.
///
/// `async fn` tests are wrapped in `#[tokio::test]`. `#[jobcheck_test::test(condor)]`
/// marks the test `#[ignore]` on machines without a working `condor_q`.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let item_fn = syn::parse_macro_input!(item as ItemFn);
  let args = syn::parse_macro_input!(attr as Args);

  let test_name = item_fn.sig.ident;
  let output = item_fn.sig.output;
  let content = item_fn.block;

  let is_async = item_fn.sig.asyncness.is_some();

  // This value will only change when `jobcheck_test` is rebuilt
  let ignore = if args.requires_condor && !is_support_condor() {
    quote! { #[ignore] }
  } else {
    quote! {}
  };

  let content = quote! {
    jobcheck_logger::init_logger_with_level(log::Level::Trace);

    #content
  };

  if is_async {
    return quote! {
      #ignore
      #[tokio::test]
      async fn #test_name() #output {
        #content
      }
    }
    .into();
  }

  quote! {
    #ignore
    #[test]
    fn #test_name() #output {
      #content
    }
  }
  .into()
}
