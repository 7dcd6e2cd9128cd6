//! Repository package types accepted by the platform.

use crate::Error;
use std::fmt;
use std::str::FromStr;

macro_rules! package_types {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Package type of a repository (`packageType` on the wire).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PackageType {
            $(
                #[doc = concat!("`", $name, "` repositories.")]
                $variant,
            )+
        }

        impl PackageType {
            /// Every accepted package type, in wire-name order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of the package type.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for PackageType {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(Error::InvalidArgument(format!(
                        "invalid package type '{s}'"
                    ))),
                }
            }
        }
    };
}

package_types! {
    Alpine => "alpine",
    Bower => "bower",
    Cargo => "cargo",
    Chef => "chef",
    Cocoapods => "cocoapods",
    Composer => "composer",
    Conan => "conan",
    Conda => "conda",
    Cran => "cran",
    Debian => "debian",
    Docker => "docker",
    Gems => "gems",
    Generic => "generic",
    GitLfs => "gitlfs",
    Go => "go",
    Gradle => "gradle",
    Helm => "helm",
    Ivy => "ivy",
    Maven => "maven",
    Npm => "npm",
    Nuget => "nuget",
    Opkg => "opkg",
    Pub => "pub",
    Puppet => "puppet",
    Pypi => "pypi",
    Rpm => "rpm",
    Sbt => "sbt",
    Swift => "swift",
    TerraformBackend => "terraformbackend",
    TerraformModule => "terraform_module",
    TerraformProvider => "terraform_provider",
    Vagrant => "vagrant",
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
