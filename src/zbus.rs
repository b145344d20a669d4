#[zbus::proxy(
    interface = "org.baseurl.Yum.Interface",
    default_service = "org.baseurl.Yum",
    default_path = "/",
    gen_async = false,
    blocking_name = "YumDaemonProxyBlocking"
)]
pub trait YumDaemon {
    fn get_version(&self) -> zbus::Result<i32>;

    fn lock(&self) -> zbus::Result<bool>;

    fn unlock(&self) -> zbus::Result<bool>;

    fn get_packages_by_name(&self, name: &str, newest_only: bool) -> zbus::Result<Vec<String>>;
}
