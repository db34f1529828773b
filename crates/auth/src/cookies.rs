use actix_web::HttpResponseBuilder;
use actix_web::cookie::Cookie;

/// Session cookie holding `value`.
pub fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value).path("/").http_only(true).finish()
}

/// Expires the named cookie on the client.
pub fn forget(builder: &mut HttpResponseBuilder, name: &'static str) {
    let mut cookie = cookie(name, String::new());
    cookie.make_removal();
    builder.cookie(cookie);
}
