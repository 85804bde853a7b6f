//! Redirect dispatch seam between URL construction and actual navigation.

// self
use crate::_prelude::*;

/// Performs the navigation that sends the user agent to the authorize URL.
///
/// Exclusive dispatch target whenever no per-call `url_handler` is supplied.
pub trait RedirectDispatcher
where
	Self: Send + Sync,
{
	/// Navigates to the provided authorize URL.
	fn redirect_to(&self, url: &Url);
}

/// Default dispatcher that hands the URL to the hosting terminal session.
///
/// A library crate cannot drive a browser itself; real applications install
/// their own dispatcher (or pass a `url_handler` per call) to perform the
/// actual navigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutRedirect;
impl RedirectDispatcher for StdoutRedirect {
	fn redirect_to(&self, url: &Url) {
		println!("Send your user to {url}.");
	}
}
