/// Test fixtures: representative HTML payloads from the aras-air pages.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the extractor. They reflect the server-rendered
/// markup returned by:
///   https://publicinfobanjir.water.gov.my/aras-air/data-paras-air/aras-air-data/?state=...
///
/// Page shape:
///   - layout/navigation tables wrap the content; only one table carries
///     station data
///   - the station table has a TWO-ROW header: plain columns use
///     rowspan="2" (flattening to doubled names such as
///     "Station Name Station Name"), and the threshold group spans its
///     sub-columns with colspan (flattening to "Threshold Normal" …
///     "Threshold Danger")
///   - water-level cells wrap the value in a graph link
///   - missing readings render as "-" and empty cells
///   - an empty state renders a single full-width "No data available in
///     table" marker row

/// Selangor page: one navigation table plus the station table with four
/// rows chosen to exercise the danger filter:
///   row 1 — level 5.52, danger 5.00 (at/above danger)
///   row 2 — level 4.00, danger 5.00 (below danger)
///   row 3 — level "-",  danger 5.00 (level missing)
///   row 4 — level 2.31, danger "-"  (threshold missing), empty district
#[cfg(test)]
pub(crate) fn fixture_selangor_page_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head><title>Aras Air | Public InfoBanjir</title></head>
<body>
  <table class="nav">
    <tr><td><a href="/aras-air/?lang=en">Water Level</a></td>
        <td><a href="/hujan/?lang=en">Rainfall</a></td></tr>
  </table>
  <div class="table-responsive">
    <table id="normaltable" class="display">
      <thead>
        <tr>
          <th rowspan="2">No</th>
          <th rowspan="2">Station Name</th>
          <th rowspan="2">District</th>
          <th rowspan="2">Main Basin</th>
          <th rowspan="2">Sub River Basin</th>
          <th rowspan="2">Last Updated</th>
          <th rowspan="2">Water Level (m) (Graph)</th>
          <th colspan="4">Threshold</th>
        </tr>
        <tr>
          <th>Normal</th>
          <th>Alert</th>
          <th>Warning</th>
          <th>Danger</th>
        </tr>
      </thead>
      <tbody>
        <tr>
          <td>1</td>
          <td>Sungai Klang di Kg. Berembang</td>
          <td>Gombak</td>
          <td>Klang</td>
          <td>Sungai Klang</td>
          <td>05/08/2026 14:00</td>
          <td><a href="station?id=3116430">5.52</a></td>
          <td>3.00</td><td>4.00</td><td>4.50</td><td>5.00</td>
        </tr>
        <tr>
          <td>2</td>
          <td>Sungai Gombak di Jln Tun Razak</td>
          <td>Petaling</td>
          <td>Klang</td>
          <td>Sungai Gombak</td>
          <td>05/08/2026 13:45</td>
          <td><a href="station?id=3216433">4.00</a></td>
          <td>3.00</td><td>4.20</td><td>4.60</td><td>5.00</td>
        </tr>
        <tr>
          <td>3</td>
          <td>Sungai Selangor di Rantau Panjang</td>
          <td>Kuala Selangor</td>
          <td>Selangor</td>
          <td>Sungai Selangor</td>
          <td>04/08/2026 23:00</td>
          <td>-</td>
          <td>2.00</td><td>3.00</td><td>4.00</td><td>5.00</td>
        </tr>
        <tr>
          <td>4</td>
          <td>Sungai Buloh di Paya Jaras</td>
          <td></td>
          <td>Buloh</td>
          <td>Sungai Buloh</td>
          <td>05/08/2026 14:15</td>
          <td><a href="station?id=3314434">2.31</a></td>
          <td>1.50</td><td>2.50</td><td>3.00</td><td>-</td>
        </tr>
      </tbody>
    </table>
  </div>
</body>
</html>"#
}

/// Pahang-style page whose threshold group has no Danger sub-column.
/// Two rows, both complete readings.
#[cfg(test)]
pub(crate) fn fixture_no_danger_column_page_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<body>
  <table id="normaltable" class="display">
    <thead>
      <tr>
        <th rowspan="2">No</th>
        <th rowspan="2">Station Name</th>
        <th rowspan="2">District</th>
        <th rowspan="2">Main Basin</th>
        <th rowspan="2">Sub River Basin</th>
        <th rowspan="2">Last Updated</th>
        <th rowspan="2">Water Level (m) (Graph)</th>
        <th colspan="3">Threshold</th>
      </tr>
      <tr>
        <th>Normal</th>
        <th>Alert</th>
        <th>Warning</th>
      </tr>
    </thead>
    <tbody>
      <tr>
        <td>1</td>
        <td>Sungai Pahang di Lubok Paku</td>
        <td>Maran</td>
        <td>Pahang</td>
        <td>Sungai Pahang</td>
        <td>05/08/2026 14:00</td>
        <td><a href="station?id=3519401">3.20</a></td>
        <td>18.00</td><td>19.50</td><td>21.00</td>
      </tr>
      <tr>
        <td>2</td>
        <td>Sungai Jelai di Kuala Medang</td>
        <td>Lipis</td>
        <td>Pahang</td>
        <td>Sungai Jelai</td>
        <td>05/08/2026 13:30</td>
        <td><a href="station?id=4023401">1.05</a></td>
        <td>30.00</td><td>32.00</td><td>33.50</td>
      </tr>
    </tbody>
  </table>
</body>
</html>"#
}

/// Maintenance page with no station table at all.
#[cfg(test)]
pub(crate) fn fixture_no_table_page_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<body>
  <div class="alert">
    <p>Sistem sedang diselenggara. The system is under maintenance.</p>
  </div>
</body>
</html>"#
}

/// Station table present but empty: DataTables renders a single
/// full-width marker row instead of readings.
#[cfg(test)]
pub(crate) fn fixture_empty_table_page_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<body>
  <table id="normaltable" class="display">
    <thead>
      <tr>
        <th rowspan="2">No</th>
        <th rowspan="2">Station Name</th>
        <th rowspan="2">District</th>
        <th rowspan="2">Main Basin</th>
        <th rowspan="2">Sub River Basin</th>
        <th rowspan="2">Last Updated</th>
        <th rowspan="2">Water Level (m) (Graph)</th>
        <th colspan="4">Threshold</th>
      </tr>
      <tr>
        <th>Normal</th>
        <th>Alert</th>
        <th>Warning</th>
        <th>Danger</th>
      </tr>
    </thead>
    <tbody>
      <tr><td colspan="11" class="dataTables_empty">No data available in table</td></tr>
    </tbody>
  </table>
</body>
</html>"#
}
